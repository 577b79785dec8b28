//! LINE interpreter.

use super::{parse_f64, ParseContext};
use crate::error::MalformedNumber;
use crate::geometry::{Path, Shape};
use crate::types::Vector2;

#[derive(Debug, Clone, Default)]
pub struct Line {
    pub start: Vector2,
    pub end: Vector2,
    /// Resolved path; empty until `close()`
    pub path: Path,
}

impl Line {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            10 => self.start.x = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.start.y = parse_f64(code, value)? * ctx.unit_scale,
            11 => self.end.x = parse_f64(code, value)? * ctx.unit_scale,
            21 => self.end.y = parse_f64(code, value)? * ctx.unit_scale,
            _ => {}
        }
        Ok(false)
    }

    pub fn close(&mut self) {
        let mut path = Path::new();
        path.move_to(self.start);
        path.line_to(self.end);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathCommand;

    #[test]
    fn test_scaled_endpoints() {
        let ctx = ParseContext { unit_scale: 0.5 };
        let mut line = Line::default();
        line.add_parm(10, "2", &ctx).unwrap();
        line.add_parm(20, "4", &ctx).unwrap();
        line.add_parm(11, "6", &ctx).unwrap();
        line.add_parm(21, "8", &ctx).unwrap();
        line.close();
        assert_eq!(
            line.path.commands,
            vec![
                PathCommand::MoveTo(Vector2::new(1.0, 2.0)),
                PathCommand::LineTo(Vector2::new(3.0, 4.0)),
            ]
        );
    }

    #[test]
    fn test_bad_coordinate() {
        let ctx = ParseContext { unit_scale: 1.0 };
        let mut line = Line::default();
        assert!(line.add_parm(10, "2,5", &ctx).is_err());
    }
}
