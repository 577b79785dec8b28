//! Planar geometry: path commands, shape primitives, arc construction.

pub mod bulge;
pub mod catmull;
pub mod path;
pub mod shape;

pub use bulge::bulge_arc;
pub use catmull::catmull_rom_to_bezier;
pub use path::{Path, PathCommand};
pub use shape::{CircleShape, CircularArc, EllipseShape, EllipticalArc, Shape};
