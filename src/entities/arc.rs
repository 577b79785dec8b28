//! ARC interpreter.

use super::{parse_f64, ParseContext};
use crate::error::MalformedNumber;
use crate::geometry::{CircularArc, Shape};
use crate::types::Vector2;

/// Circular arc entity. DXF records start/end angles in degrees running
/// counterclockwise; the emitted primitive negates the start angle and
/// sweeps clockwise.
#[derive(Debug, Clone, Default)]
pub struct Arc {
    pub center: Vector2,
    pub radius: f64,
    /// Start angle in degrees (group 50)
    pub start_angle: f64,
    /// End angle in degrees (group 51)
    pub end_angle: f64,
    resolved: Option<CircularArc>,
}

impl Arc {
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
            50 => self.start_angle = parse_f64(code, value)?,
            51 => self.end_angle = parse_f64(code, value)?,
            _ => {}
        }
        Ok(false)
    }

    pub fn close(&mut self) {
        let end = if self.end_angle < self.start_angle {
            self.end_angle + 360.0
        } else {
            self.end_angle
        };
        self.resolved = Some(CircularArc {
            center: self.center,
            radius: self.radius,
            start: -self.start_angle,
            extent: self.start_angle - end,
        });
    }

    pub fn shape(&self) -> Option<Shape> {
        self.resolved.map(Shape::Arc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close_arc(start: &str, end: &str) -> CircularArc {
        let ctx = ParseContext { unit_scale: 1.0 };
        let mut a = Arc::default();
        a.add_parm(40, "1", &ctx).unwrap();
        a.add_parm(50, start, &ctx).unwrap();
        a.add_parm(51, end, &ctx).unwrap();
        a.close();
        match a.shape() {
            Some(Shape::Arc(arc)) => arc,
            other => panic!("expected arc, got {:?}", other),
        }
    }

    #[test]
    fn test_quarter_arc_orientation() {
        let arc = close_arc("0", "90");
        assert_eq!(arc.start, 0.0);
        assert_eq!(arc.extent, -90.0);
        let p0 = arc.point_at(0.0);
        let p1 = arc.point_at(1.0);
        assert!((p0.x - 1.0).abs() < 1e-9 && p0.y.abs() < 1e-9);
        assert!(p1.x.abs() < 1e-9 && (p1.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrapping_end_angle() {
        // 270° to 45° crosses zero: sweep magnitude is 135°
        let arc = close_arc("270", "45");
        assert_eq!(arc.start, -270.0);
        assert!((arc.extent - (-135.0)).abs() < 1e-9);
    }
}
