//! Core value types: vectors, bounds, transforms, drawing units.

pub mod bounds;
pub mod transform;
pub mod units;
pub mod vector;

pub use bounds::BoundingBox2D;
pub use transform::{Conformal, LinearClass, Transform2D};
pub use units::Units;
pub use vector::Vector2;
