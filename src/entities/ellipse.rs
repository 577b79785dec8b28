//! ELLIPSE interpreter.

use super::{parse_f64, ParseContext};
use crate::error::MalformedNumber;
use crate::geometry::{EllipseShape, Shape};
use crate::types::Vector2;

/// Ellipse entity. The major axis arrives as an endpoint *offset* from the
/// center (groups 11/21); the minor axis is the major length times the
/// ratio (group 40). Start/end parameters are captured but partial
/// elliptical arcs are rendered as full ellipses.
#[derive(Debug, Clone, Default)]
pub struct Ellipse {
    pub center: Vector2,
    /// Major-axis endpoint offset from the center
    pub major_axis: Vector2,
    /// Minor-to-major axis ratio (group 40)
    pub ratio: f64,
    /// Start parameter (group 41); 0 for a full ellipse
    pub start_parameter: f64,
    /// End parameter (group 42); 2π for a full ellipse
    pub end_parameter: f64,
    resolved: Option<EllipseShape>,
}

impl Ellipse {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            10 => self.center.x = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.center.y = parse_f64(code, value)? * ctx.unit_scale,
            11 => self.major_axis.x = parse_f64(code, value)? * ctx.unit_scale,
            21 => self.major_axis.y = parse_f64(code, value)? * ctx.unit_scale,
            40 => self.ratio = parse_f64(code, value)?,
            41 => self.start_parameter = parse_f64(code, value)?,
            42 => self.end_parameter = parse_f64(code, value)?,
            _ => {}
        }
        Ok(false)
    }

    pub fn close(&mut self) {
        let rx = self.major_axis.length();
        let ry = (rx * self.ratio).abs();
        self.resolved = Some(EllipseShape {
            center: self.center,
            rx,
            ry,
            rotation: self.major_axis.y.atan2(self.major_axis.x),
        });
    }

    pub fn shape(&self) -> Option<Shape> {
        self.resolved.map(Shape::Ellipse)
    }
}
