//! SPLINE interpreter.
//!
//! DXF splines are nominally NURBS; this interpreter treats the control
//! polygon as a Catmull-Rom spline and converts each span to a cubic Bezier
//! segment, which is accurate enough for plotting and cutting workflows.

use super::{parse_f64, parse_i64, ParseContext};
use crate::error::MalformedNumber;
use crate::geometry::{catmull_rom_to_bezier, Path, Shape};
use crate::types::Vector2;

#[derive(Debug, Clone, Default)]
pub struct Spline {
    /// Closed flag (group 70, bit 0)
    pub closed: bool,
    /// Declared number of control points (group 73)
    pub control_point_count: i64,
    /// Collected control points, in inches
    pub control_points: Vec<Vector2>,
    pending_x: Option<f64>,
    pending_y: Option<f64>,
    has_move_to: bool,
    /// Built incrementally once the declared point count is reached
    pub path: Path,
}

impl Spline {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            10 => self.pending_x = Some(parse_f64(code, value)? * ctx.unit_scale),
            20 => self.pending_y = Some(parse_f64(code, value)? * ctx.unit_scale),
            70 => self.closed = parse_i64(code, value)? & 1 != 0,
            73 => self.control_point_count = parse_i64(code, value)?,
            _ => {}
        }
        if let (Some(x), Some(y)) = (self.pending_x, self.pending_y) {
            self.pending_x = None;
            self.pending_y = None;
            self.control_points.push(Vector2::new(x, y));
            if self.control_points.len() as i64 == self.control_point_count {
                self.emit_segments();
            }
        }
        Ok(false)
    }

    fn emit_segments(&mut self) {
        let points = self.control_points.clone();
        let n = points.len();
        if n == 0 {
            return;
        }
        if !self.has_move_to {
            self.path.move_to(points[0]);
            self.has_move_to = true;
        }
        let segments = if self.closed { n } else { n - 1 };
        for i in 0..segments {
            let (p0, p1, p2, p3) = if self.closed {
                let at = |k: i64| points[k.rem_euclid(n as i64) as usize];
                let i = i as i64;
                (at(i - 1), at(i), at(i + 1), at(i + 2))
            } else {
                (
                    points[i.saturating_sub(1)],
                    points[i],
                    points[i + 1],
                    points[(i + 2).min(n - 1)],
                )
            };
            let (c1, c2, to) = catmull_rom_to_bezier(p0, p1, p2, p3);
            self.path.curve_to(c1, c2, to);
        }
    }

    pub fn close(&mut self) {
        if self.closed && !self.path.is_empty() {
            self.path.close_path();
        }
    }

    pub fn shape(&self) -> Option<Shape> {
        if self.path.is_empty() {
            None
        } else {
            Some(Shape::Path(self.path.clone()))
        }
    }
}
