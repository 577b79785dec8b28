//! LWPOLYLINE interpreter.

use super::{parse_f64, parse_i64, ParseContext};
use crate::error::MalformedNumber;
use crate::geometry::{bulge_arc, Path, Shape};
use crate::types::Vector2;

/// One lightweight-polyline segment: a vertex and the bulge of the edge
/// leaving it.
#[derive(Debug, Clone, Copy)]
pub struct LwSegment {
    pub point: Vector2,
    pub bulge: f64,
}

/// Lightweight polyline: carries its own vertex list. Each (10, 20) pair
/// opens a new segment; a following group 42 writes that segment's bulge.
#[derive(Debug, Clone, Default)]
pub struct LwPolyline {
    pub segments: Vec<LwSegment>,
    /// Closed flag (group 70, bit 0)
    pub closed: bool,
    /// Declared vertex count (group 90, informational)
    pub vertex_count: i64,
    pending_x: Option<f64>,
    pending_y: Option<f64>,
    /// Resolved path; empty until `close()`
    pub path: Path,
}

impl LwPolyline {
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
            42 => {
                let bulge = parse_f64(code, value)?;
                if let Some(segment) = self.segments.last_mut() {
                    segment.bulge = bulge;
                }
            }
            90 => self.vertex_count = parse_i64(code, value)?,
            _ => {}
        }
        if let (Some(x), Some(y)) = (self.pending_x, self.pending_y) {
            self.pending_x = None;
            self.pending_y = None;
            self.segments.push(LwSegment {
                point: Vector2::new(x, y),
                bulge: 0.0,
            });
        }
        Ok(false)
    }

    pub fn close(&mut self) {
        let mut path = Path::new();
        let mut first = Vector2::ZERO;
        let mut last = Vector2::ZERO;
        let mut first_seen = false;
        let mut bulge = 0.0;
        for segment in &self.segments {
            if bulge != 0.0 {
                path.append_arc(bulge_arc(last, segment.point, bulge));
                last = segment.point;
            } else if !first_seen {
                first_seen = true;
                path.move_to(segment.point);
                first = segment.point;
                last = segment.point;
            } else {
                path.line_to(segment.point);
                last = segment.point;
            }
            bulge = segment.bulge;
        }
        if self.closed && first_seen {
            if bulge != 0.0 {
                path.append_arc(bulge_arc(last, first, bulge));
            } else {
                // an explicit edge back home, not a path close
                path.line_to(first);
            }
        }
        self.path = path;
    }

    pub fn shape(&self) -> Option<Shape> {
        if self.path.is_empty() {
            None
        } else {
            Some(Shape::Path(self.path.clone()))
        }
    }
}
