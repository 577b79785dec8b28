//! CIRCLE interpreter.

use super::{parse_f64, ParseContext};
use crate::error::MalformedNumber;
use crate::geometry::{CircleShape, Shape};
use crate::types::Vector2;

#[derive(Debug, Clone, Default)]
pub struct Circle {
    pub center: Vector2,
    pub radius: f64,
    resolved: Option<CircleShape>,
}

impl Circle {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            10 => self.center.x = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.center.y = parse_f64(code, value)? * ctx.unit_scale,
            40 => self.radius = parse_f64(code, value)? * ctx.unit_scale,
            _ => {}
        }
        Ok(false)
    }

    pub fn close(&mut self) {
        self.resolved = Some(CircleShape {
            center: self.center,
            radius: self.radius,
        });
    }

    pub fn shape(&self) -> Option<Shape> {
        self.resolved.map(Shape::Circle)
    }
}
