//! POLYLINE and VERTEX interpreters.

use super::{parse_f64, parse_i64, ParseContext};
use crate::error::MalformedNumber;
use crate::geometry::{bulge_arc, Path, Shape};
use crate::types::Vector2;

/// A polyline vertex. Assembled as its own entity, then adopted by the
/// enclosing POLYLINE. A non-zero bulge applies to the edge leading to the
/// *next* vertex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl Vertex {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        match code {
            10 => self.x = parse_f64(code, value)? * ctx.unit_scale,
            20 => self.y = parse_f64(code, value)? * ctx.unit_scale,
            42 => self.bulge = parse_f64(code, value)?,
            _ => {}
        }
        Ok(false)
    }

    pub fn point(&self) -> Vector2 {
        Vector2::new(self.x, self.y)
    }
}

/// Heavy polyline: collects VERTEX children until SEQEND, then resolves a
/// path of line and bulge-arc edges.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// Closed flag (group 70, bit 0)
    pub closed: bool,
    /// Adopted vertices, in file order
    pub vertices: Vec<Vertex>,
    /// Resolved path; empty until `close()`
    pub path: Path,
}

impl Polyline {
    pub fn add_parm(
        &mut self,
        code: i32,
        value: &str,
        _ctx: &ParseContext,
    ) -> Result<bool, MalformedNumber> {
        if code == 70 {
            self.closed = parse_i64(code, value)? & 1 != 0;
        }
        Ok(false)
    }

    pub fn add_child(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn close(&mut self) {
        let mut path = Path::new();
        let mut first = Vector2::ZERO;
        let mut last = Vector2::ZERO;
        let mut first_point = true;
        let mut bulge = 0.0;
        for vertex in &self.vertices {
            let p = vertex.point();
            if first_point {
                first_point = false;
                path.move_to(p);
                first = p;
                last = p;
            } else if bulge != 0.0 {
                path.append_arc(bulge_arc(last, p, bulge));
                last = p;
            } else {
                path.line_to(p);
                last = p;
            }
            bulge = vertex.bulge;
        }
        if self.closed && !first_point {
            if bulge != 0.0 {
                path.append_arc(bulge_arc(last, first, bulge));
            } else {
                path.close_path();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PathCommand;

    fn vertex(x: f64, y: f64, bulge: f64) -> Vertex {
        Vertex { x, y, bulge }
    }

    #[test]
    fn test_square_path() {
        let mut p = Polyline {
            closed: true,
            ..Default::default()
        };
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            p.add_child(vertex(x, y, 0.0));
        }
        p.close();
        let commands = &p.path.commands;
        assert_eq!(commands.len(), 5);
        assert!(matches!(commands[0], PathCommand::MoveTo(_)));
        assert!(matches!(commands[4], PathCommand::ClosePath));
    }

    #[test]
    fn test_bulge_edge() {
        let mut p = Polyline::default();
        p.add_child(vertex(0.0, 0.0, 1.0));
        p.add_child(vertex(1.0, 0.0, 0.0));
        p.close();
        let commands = &p.path.commands;
        assert_eq!(commands.len(), 2);
        let arc = match &commands[1] {
            PathCommand::Arc(a) => a,
            other => panic!("expected arc, got {:?}", other),
        };
        assert!((arc.extent.abs() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_closing_bulge_emits_arc_not_closepath() {
        let mut p = Polyline {
            closed: true,
            ..Default::default()
        };
        p.add_child(vertex(0.0, 0.0, 0.0));
        p.add_child(vertex(1.0, 0.0, 1.0));
        p.close();
        assert!(matches!(
            p.path.commands.last(),
            Some(PathCommand::Arc(_))
        ));
    }

    #[test]
    fn test_no_vertices_yields_nothing() {
        let mut p = Polyline {
            closed: true,
            ..Default::default()
        };
        p.close();
        assert!(p.shape().is_none());
    }
}
