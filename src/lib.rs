//! # dxfpath
//!
//! A pure Rust converter from ASCII DXF drawings to device-independent 2D
//! vector paths, suitable for display or for driving cutting, plotting and
//! embroidery machines.
//!
//! The parser reads the tagged-group stream of a DXF file with a stack of
//! entity interpreters, reconstructs geometry (bulge arcs, control-point
//! splines, nested block inserts), resolves drawing units from the header,
//! and emits shapes in inches, Y-flipped and uniformly scaled to fit a
//! caller-supplied size window.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dxfpath::DxfParser;
//!
//! let parser = DxfParser::new();
//! let drawing = parser.parse_file("pattern.dxf", 14.0, 8.0)?;
//!
//! for shape in &drawing.shapes {
//!     println!("{:?}", shape.bounds());
//! }
//! println!("{} x {} {}, scaled: {}",
//!     drawing.bounds.unwrap().width(),
//!     drawing.bounds.unwrap().height(),
//!     drawing.units_label(),
//!     drawing.scaled);
//! # Ok::<(), dxfpath::DxfError>(())
//! ```
//!
//! ## Coverage
//!
//! LINE, CIRCLE, ARC, ELLIPSE, POLYLINE/VERTEX/SEQEND, LWPOLYLINE, SPLINE,
//! INSERT/BLOCK, DIMENSION, TEXT, MTEXT and HATCH are interpreted; unknown
//! entity types are skipped without disturbing the rest of the drawing, and
//! malformed numeric values discard only the entity that carried them.
//! 3D entities, OCS, binary DXF and DWG are out of scope.
//!
//! Text rendering is delegated to a pluggable [`GlyphOutliner`]; the
//! built-in [`PlaceholderOutliner`] stands in when no platform font stack
//! is available.

pub mod document;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod io;
pub mod notification;
pub mod types;

pub use document::{Drawing, Header};
pub use error::{DxfError, MalformedNumber, Result};
pub use geometry::{
    CircleShape, CircularArc, EllipseShape, EllipticalArc, Path, PathCommand, Shape,
};
pub use glyph::{GlyphOutliner, GlyphRequest, PlaceholderOutliner};
pub use io::DxfParser;
pub use notification::{Notification, NotificationCollection, NotificationType};
pub use types::{BoundingBox2D, Transform2D, Units, Vector2};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
