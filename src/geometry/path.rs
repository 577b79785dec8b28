//! Command paths.
//!
//! A `Path` is an ordered list of drawing commands. Arc segments stay
//! parametric inside a path; they are flattened to cubic Bezier curves only
//! when a transform cannot preserve them.

use super::shape::{CircularArc, EllipticalArc, Shape};
use crate::types::{BoundingBox2D, LinearClass, Transform2D, Vector2};

/// A single path command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Begin a new subpath at the given point
    MoveTo(Vector2),
    /// Straight segment to the given point
    LineTo(Vector2),
    /// Cubic Bezier segment
    CurveTo {
        c1: Vector2,
        c2: Vector2,
        to: Vector2,
    },
    /// Circular arc segment; its start point continues the current point
    Arc(CircularArc),
    /// Elliptical arc segment; its start point continues the current point
    EllipticalArc(EllipticalArc),
    /// Close the current subpath back to its most recent `MoveTo`
    ClosePath,
}

/// An ordered sequence of path commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    /// Create an empty path
    pub fn new() -> Self {
        Path {
            commands: Vec::new(),
        }
    }

    /// Whether the path holds no commands
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Begin a new subpath
    pub fn move_to(&mut self, p: Vector2) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    /// Straight segment
    pub fn line_to(&mut self, p: Vector2) {
        self.commands.push(PathCommand::LineTo(p));
    }

    /// Cubic Bezier segment
    pub fn curve_to(&mut self, c1: Vector2, c2: Vector2, to: Vector2) {
        self.commands.push(PathCommand::CurveTo { c1, c2, to });
    }

    /// Circular arc segment continuing the current point
    pub fn append_arc(&mut self, arc: CircularArc) {
        self.commands.push(PathCommand::Arc(arc));
    }

    /// Close the current subpath
    pub fn close_path(&mut self) {
        self.commands.push(PathCommand::ClosePath);
    }

    /// Append another path as independent subpaths
    pub fn append_path(&mut self, other: &Path) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Append a shape as an independent subpath
    pub fn append_shape(&mut self, shape: &Shape) {
        match shape {
            Shape::Path(p) => self.append_path(p),
            Shape::Circle(c) => self.commands.extend(Shape::circle_commands(c)),
            Shape::Ellipse(e) => self.commands.extend(Shape::ellipse_commands(e)),
            Shape::Arc(a) => {
                self.commands.push(PathCommand::MoveTo(a.start_point()));
                self.commands.push(PathCommand::Arc(*a));
            }
        }
    }

    /// Bounding box over all command coordinates. Bezier control points are
    /// included (a conservative box); arc segment bounds are tight.
    pub fn bounds(&self) -> Option<BoundingBox2D> {
        let mut bbox: Option<BoundingBox2D> = None;
        let mut include = |b: BoundingBox2D| {
            bbox = Some(match bbox {
                Some(prev) => prev.merge(&b),
                None => b,
            });
        };
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    include(BoundingBox2D::from_point(*p))
                }
                PathCommand::CurveTo { c1, c2, to } => {
                    let mut b = BoundingBox2D::from_point(*c1);
                    b.expand_to_include(*c2);
                    b.expand_to_include(*to);
                    include(b);
                }
                PathCommand::Arc(a) => include(a.bounds()),
                PathCommand::EllipticalArc(e) => include(e.bounds()),
                PathCommand::ClosePath => {}
            }
        }
        bbox
    }

    /// Replace arc segments with cubic Bezier approximations
    pub fn flattened(&self) -> Path {
        let mut out = Vec::with_capacity(self.commands.len());
        let mut current: Option<Vector2> = None;
        let mut subpath_start: Option<Vector2> = None;
        for command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => {
                    out.push(*command);
                    current = Some(*p);
                    subpath_start = Some(*p);
                }
                PathCommand::LineTo(p) => {
                    out.push(*command);
                    current = Some(*p);
                }
                PathCommand::CurveTo { to, .. } => {
                    out.push(*command);
                    current = Some(*to);
                }
                PathCommand::ClosePath => {
                    out.push(*command);
                    current = subpath_start;
                }
                PathCommand::Arc(a) => {
                    Self::join(&mut out, &mut current, &mut subpath_start, a.start_point());
                    a.flatten_into(&mut out);
                    current = Some(a.end_point());
                }
                PathCommand::EllipticalArc(e) => {
                    Self::join(&mut out, &mut current, &mut subpath_start, e.start_point());
                    e.flatten_into(&mut out);
                    current = Some(e.end_point());
                }
            }
        }
        Path { commands: out }
    }

    fn join(
        out: &mut Vec<PathCommand>,
        current: &mut Option<Vector2>,
        subpath_start: &mut Option<Vector2>,
        start: Vector2,
    ) {
        match current {
            None => {
                out.push(PathCommand::MoveTo(start));
                *subpath_start = Some(start);
            }
            Some(p) if (*p - start).length() > 1e-9 => out.push(PathCommand::LineTo(start)),
            _ => {}
        }
        *current = Some(start);
    }

    /// Apply an affine transform. Arc segments survive conformal transforms
    /// and positive per-axis scaling; any other transform flattens them.
    pub fn transform(&self, t: &Transform2D) -> Path {
        match t.classify() {
            LinearClass::Conformal(c) => {
                let commands = self
                    .commands
                    .iter()
                    .map(|command| match command {
                        PathCommand::Arc(a) => PathCommand::Arc(a.conformal_transformed(t, &c)),
                        PathCommand::EllipticalArc(e) => {
                            PathCommand::EllipticalArc(e.conformal_transformed(t, &c))
                        }
                        other => Self::map_points(other, t),
                    })
                    .collect();
                Path { commands }
            }
            LinearClass::Diagonal { sx, sy } if !self.has_rotated_elliptical() => {
                let commands = self
                    .commands
                    .iter()
                    .map(|command| match command {
                        PathCommand::Arc(a) => {
                            PathCommand::EllipticalArc(a.diagonal_transformed(t, sx, sy))
                        }
                        PathCommand::EllipticalArc(e) => {
                            PathCommand::EllipticalArc(e.diagonal_transformed(t, sx, sy))
                        }
                        other => Self::map_points(other, t),
                    })
                    .collect();
                Path { commands }
            }
            _ => {
                let commands = self
                    .flattened()
                    .commands
                    .iter()
                    .map(|command| Self::map_points(command, t))
                    .collect();
                Path { commands }
            }
        }
    }

    fn has_rotated_elliptical(&self) -> bool {
        self.commands.iter().any(|c| match c {
            PathCommand::EllipticalArc(e) => e.rotation.abs() > 1e-12,
            _ => false,
        })
    }

    fn map_points(command: &PathCommand, t: &Transform2D) -> PathCommand {
        match command {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(t.apply(*p)),
            PathCommand::LineTo(p) => PathCommand::LineTo(t.apply(*p)),
            PathCommand::CurveTo { c1, c2, to } => PathCommand::CurveTo {
                c1: t.apply(*c1),
                c2: t.apply(*c2),
                to: t.apply(*to),
            },
            PathCommand::ClosePath => PathCommand::ClosePath,
            // Arc commands are handled by the callers above
            other => *other,
        }
    }
}
