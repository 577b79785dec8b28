//! HATCH interpreter.
//!
//! Accepted so that its groups do not disturb the surrounding stack, but
//! boundary geometry is not reconstructed; a hatch produces no shape.

/// Inert hatch entity
#[derive(Debug, Clone, Default)]
pub struct Hatch;
