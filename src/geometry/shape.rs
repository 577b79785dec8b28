//! Shape primitives and the resolved shape type.
//!
//! Angles follow the plotting convention: the point of a circular arc at
//! angle `a` degrees is `(cx + r·cos a, cy − r·sin a)`, so a positive sweep
//! runs clockwise in a Y-up drawing frame.

use super::path::{Path, PathCommand};
use crate::types::{BoundingBox2D, Conformal, LinearClass, Transform2D, Vector2};

/// A circular arc segment described by center, radius and a start/sweep
/// angle pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub center: Vector2,
    pub radius: f64,
    /// Start angle in degrees
    pub start: f64,
    /// Signed sweep in degrees
    pub extent: f64,
}

impl CircularArc {
    /// Point on the full circle at the given angle in degrees
    pub fn point_at_angle(&self, degrees: f64) -> Vector2 {
        let a = degrees.to_radians();
        Vector2::new(
            self.center.x + self.radius * a.cos(),
            self.center.y - self.radius * a.sin(),
        )
    }

    /// Point on the arc at normalized parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Vector2 {
        self.point_at_angle(self.start + t * self.extent)
    }

    /// First point of the arc
    pub fn start_point(&self) -> Vector2 {
        self.point_at_angle(self.start)
    }

    /// Last point of the arc
    pub fn end_point(&self) -> Vector2 {
        self.point_at_angle(self.start + self.extent)
    }

    /// Tight bounding box of the swept arc
    pub fn bounds(&self) -> BoundingBox2D {
        if self.extent.abs() >= 360.0 {
            let r = Vector2::new(self.radius, self.radius);
            return BoundingBox2D::new(self.center - r, self.center + r);
        }
        let mut bbox = BoundingBox2D::from_point(self.start_point());
        bbox.expand_to_include(self.end_point());
        let lo = self.start.min(self.start + self.extent);
        let hi = self.start.max(self.start + self.extent);
        let mut k = (lo / 90.0).ceil() as i64;
        while (k as f64) * 90.0 <= hi {
            bbox.expand_to_include(self.point_at_angle(k as f64 * 90.0));
            k += 1;
        }
        bbox
    }

    /// Arc under a conformal transform stays circular; angles are remapped
    /// according to the rotation and orientation of the transform.
    pub(crate) fn conformal_transformed(&self, t: &Transform2D, c: &Conformal) -> CircularArc {
        let deg = c.angle.to_degrees();
        let (start, extent) = if c.reflected {
            (-(self.start + deg), -self.extent)
        } else {
            (self.start - deg, self.extent)
        };
        CircularArc {
            center: t.apply(self.center),
            radius: self.radius * c.scale,
            start,
            extent,
        }
    }

    /// Arc under positive per-axis scaling becomes an elliptical arc with
    /// the same parameter angles.
    pub(crate) fn diagonal_transformed(&self, t: &Transform2D, sx: f64, sy: f64) -> EllipticalArc {
        EllipticalArc {
            center: t.apply(self.center),
            rx: self.radius * sx,
            ry: self.radius * sy,
            rotation: 0.0,
            start: self.start,
            extent: self.extent,
        }
    }

    /// Append cubic Bezier segments approximating this arc. The caller
    /// guarantees the path's current point is the arc's start point.
    pub(crate) fn flatten_into(&self, commands: &mut Vec<PathCommand>) {
        let segments = (self.extent.abs() / 90.0).ceil().max(1.0) as usize;
        let step = self.extent.to_radians() / segments as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        let start = self.start.to_radians();
        for i in 0..segments {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            let p0 = self.point_at_angle(a0.to_degrees());
            let p1 = self.point_at_angle(a1.to_degrees());
            let d0 = Vector2::new(-a0.sin(), -a0.cos()) * self.radius;
            let d1 = Vector2::new(-a1.sin(), -a1.cos()) * self.radius;
            commands.push(PathCommand::CurveTo {
                c1: p0 + d0 * k,
                c2: p1 - d1 * k,
                to: p1,
            });
        }
    }
}

/// An elliptical arc segment: an axis pair rotated by `rotation` radians,
/// swept by start/extent parameter angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipticalArc {
    pub center: Vector2,
    /// Semi-axis along the unrotated X direction
    pub rx: f64,
    /// Semi-axis along the unrotated Y direction
    pub ry: f64,
    /// Axis rotation in radians, counterclockwise
    pub rotation: f64,
    /// Start parameter angle in degrees
    pub start: f64,
    /// Signed sweep in degrees
    pub extent: f64,
}

impl EllipticalArc {
    fn local(&self, degrees: f64) -> Vector2 {
        let a = degrees.to_radians();
        Vector2::new(self.rx * a.cos(), -self.ry * a.sin())
    }

    fn rotated(&self, v: Vector2) -> Vector2 {
        let (sin, cos) = self.rotation.sin_cos();
        Vector2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
    }

    /// Point on the full ellipse at the given parameter angle in degrees
    pub fn point_at_angle(&self, degrees: f64) -> Vector2 {
        self.center + self.rotated(self.local(degrees))
    }

    /// Point on the arc at normalized parameter `t` in `[0, 1]`
    pub fn point_at(&self, t: f64) -> Vector2 {
        self.point_at_angle(self.start + t * self.extent)
    }

    /// First point of the arc
    pub fn start_point(&self) -> Vector2 {
        self.point_at_angle(self.start)
    }

    /// Last point of the arc
    pub fn end_point(&self) -> Vector2 {
        self.point_at_angle(self.start + self.extent)
    }

    /// Tight bounding box of the swept arc
    pub fn bounds(&self) -> BoundingBox2D {
        let mut bbox = BoundingBox2D::from_point(self.start_point());
        bbox.expand_to_include(self.end_point());

        // Parameter angles of the axis-extreme points of the full ellipse
        let (sin, cos) = self.rotation.sin_cos();
        let ax = (self.ry * sin).atan2(self.rx * cos).to_degrees();
        let ay = (-self.ry * cos).atan2(self.rx * sin).to_degrees();
        let lo = self.start.min(self.start + self.extent);
        let hi = self.start.max(self.start + self.extent);
        for base in [ax, ax + 180.0, ay, ay + 180.0] {
            if self.extent.abs() >= 360.0 {
                bbox.expand_to_include(self.point_at_angle(base));
                continue;
            }
            let k = ((lo - base) / 360.0).ceil();
            if base + k * 360.0 <= hi {
                bbox.expand_to_include(self.point_at_angle(base));
            }
        }
        bbox
    }

    pub(crate) fn conformal_transformed(&self, t: &Transform2D, c: &Conformal) -> EllipticalArc {
        let (rotation, start, extent) = if c.reflected {
            (c.angle - self.rotation, -self.start, -self.extent)
        } else {
            (self.rotation + c.angle, self.start, self.extent)
        };
        EllipticalArc {
            center: t.apply(self.center),
            rx: self.rx * c.scale,
            ry: self.ry * c.scale,
            rotation,
            start,
            extent,
        }
    }

    /// Valid only for unrotated elliptical arcs
    pub(crate) fn diagonal_transformed(&self, t: &Transform2D, sx: f64, sy: f64) -> EllipticalArc {
        EllipticalArc {
            center: t.apply(self.center),
            rx: self.rx * sx,
            ry: self.ry * sy,
            ..*self
        }
    }

    /// Append cubic Bezier segments approximating this arc. The caller
    /// guarantees the path's current point is the arc's start point.
    pub(crate) fn flatten_into(&self, commands: &mut Vec<PathCommand>) {
        let segments = (self.extent.abs() / 90.0).ceil().max(1.0) as usize;
        let step = self.extent.to_radians() / segments as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        let start = self.start.to_radians();
        for i in 0..segments {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            let p0 = self.point_at_angle(a0.to_degrees());
            let p1 = self.point_at_angle(a1.to_degrees());
            let d0 = self.rotated(Vector2::new(-self.rx * a0.sin(), -self.ry * a0.cos()));
            let d1 = self.rotated(Vector2::new(-self.rx * a1.sin(), -self.ry * a1.cos()));
            commands.push(PathCommand::CurveTo {
                c1: p0 + d0 * k,
                c2: p1 - d1 * k,
                to: p1,
            });
        }
    }
}

/// A full circle primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub center: Vector2,
    pub radius: f64,
}

impl CircleShape {
    /// Bounding frame of the circle
    pub fn bounds(&self) -> BoundingBox2D {
        let r = Vector2::new(self.radius, self.radius);
        BoundingBox2D::new(self.center - r, self.center + r)
    }

    fn full_arc(&self) -> CircularArc {
        CircularArc {
            center: self.center,
            radius: self.radius,
            start: 0.0,
            extent: 360.0,
        }
    }
}

/// A full, possibly rotated, ellipse primitive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseShape {
    pub center: Vector2,
    /// Semi-major axis length
    pub rx: f64,
    /// Semi-minor axis length
    pub ry: f64,
    /// Axis rotation in radians, counterclockwise
    pub rotation: f64,
}

impl EllipseShape {
    fn full_arc(&self) -> EllipticalArc {
        EllipticalArc {
            center: self.center,
            rx: self.rx,
            ry: self.ry,
            rotation: self.rotation,
            start: 0.0,
            extent: 360.0,
        }
    }

    /// Tight bounding box of the rotated ellipse
    pub fn bounds(&self) -> BoundingBox2D {
        self.full_arc().bounds()
    }
}

/// A resolved planar shape: a command path or a primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Path(Path),
    Circle(CircleShape),
    Ellipse(EllipseShape),
    Arc(CircularArc),
}

impl Shape {
    /// Bounding box, or `None` for an empty path
    pub fn bounds(&self) -> Option<BoundingBox2D> {
        match self {
            Shape::Path(p) => p.bounds(),
            Shape::Circle(c) => Some(c.bounds()),
            Shape::Ellipse(e) => Some(e.bounds()),
            Shape::Arc(a) => Some(a.bounds()),
        }
    }

    /// Render the shape as a command path
    pub fn to_path(&self) -> Path {
        let mut path = Path::new();
        path.append_shape(self);
        path
    }

    /// Apply an affine transform, keeping primitives parametric whenever the
    /// transform allows it and flattening to Bezier curves otherwise.
    pub fn transform(&self, t: &Transform2D) -> Shape {
        let class = t.classify();
        match (self, class) {
            (Shape::Path(p), _) => Shape::Path(p.transform(t)),
            (Shape::Circle(c), LinearClass::Conformal(cf)) => Shape::Circle(CircleShape {
                center: t.apply(c.center),
                radius: c.radius * cf.scale,
            }),
            (Shape::Circle(c), LinearClass::Diagonal { sx, sy }) => Shape::Ellipse(EllipseShape {
                center: t.apply(c.center),
                rx: c.radius * sx,
                ry: c.radius * sy,
                rotation: 0.0,
            }),
            (Shape::Ellipse(e), LinearClass::Conformal(cf)) => {
                let a = e.full_arc().conformal_transformed(t, &cf);
                Shape::Ellipse(EllipseShape {
                    center: a.center,
                    rx: a.rx,
                    ry: a.ry,
                    rotation: a.rotation,
                })
            }
            (Shape::Ellipse(e), LinearClass::Diagonal { sx, sy }) if e.rotation.abs() < 1e-12 => {
                Shape::Ellipse(EllipseShape {
                    center: t.apply(e.center),
                    rx: e.rx * sx,
                    ry: e.ry * sy,
                    rotation: 0.0,
                })
            }
            (Shape::Arc(a), LinearClass::Conformal(cf)) => {
                Shape::Arc(a.conformal_transformed(t, &cf))
            }
            (Shape::Arc(a), LinearClass::Diagonal { sx, sy }) => {
                let ea = a.diagonal_transformed(t, sx, sy);
                let mut path = Path::new();
                path.move_to(ea.start_point());
                path.commands.push(PathCommand::EllipticalArc(ea));
                Shape::Path(path)
            }
            _ => Shape::Path(self.to_path().transform(t)),
        }
    }

    pub(crate) fn circle_commands(c: &CircleShape) -> Vec<PathCommand> {
        let arc = c.full_arc();
        vec![
            PathCommand::MoveTo(arc.start_point()),
            PathCommand::Arc(arc),
            PathCommand::ClosePath,
        ]
    }

    pub(crate) fn ellipse_commands(e: &EllipseShape) -> Vec<PathCommand> {
        let arc = e.full_arc();
        vec![
            PathCommand::MoveTo(arc.start_point()),
            PathCommand::EllipticalArc(arc),
            PathCommand::ClosePath,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector2, b: Vector2) {
        assert!(
            (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9,
            "{} != {}",
            a,
            b
        );
    }

    #[test]
    fn test_arc_points() {
        // quarter sweep from (1,0) to (0,1), clockwise convention
        let arc = CircularArc {
            center: Vector2::ZERO,
            radius: 1.0,
            start: 0.0,
            extent: -90.0,
        };
        assert_close(arc.point_at(0.0), Vector2::new(1.0, 0.0));
        assert_close(arc.point_at(1.0), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_arc_bounds_quarter() {
        let arc = CircularArc {
            center: Vector2::ZERO,
            radius: 1.0,
            start: 0.0,
            extent: -90.0,
        };
        let b = arc.bounds();
        assert!((b.min.x - 0.0).abs() < 1e-9);
        assert!((b.min.y - 0.0).abs() < 1e-9);
        assert!((b.max.x - 1.0).abs() < 1e-9);
        assert!((b.max.y - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_bounds_half() {
        // semicircle from (0,0) to (1,0) dipping to (0.5, -0.5)
        let arc = CircularArc {
            center: Vector2::new(0.5, 0.0),
            radius: 0.5,
            start: 180.0,
            extent: -180.0,
        };
        let b = arc.bounds();
        assert!((b.min.y - (-0.5)).abs() < 1e-9);
        assert!((b.max.y - 0.0).abs() < 1e-9);
        assert!((b.min.x - 0.0).abs() < 1e-9);
        assert!((b.max.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_arc_flip_transform() {
        let arc = CircularArc {
            center: Vector2::new(0.5, 0.0),
            radius: 0.5,
            start: 180.0,
            extent: -180.0,
        };
        let mut t = Transform2D::identity();
        t.scale(1.0, -1.0);
        let flipped = match Shape::Arc(arc).transform(&t) {
            Shape::Arc(a) => a,
            other => panic!("expected arc, got {:?}", other),
        };
        assert_close(flipped.point_at(0.0), Vector2::new(0.0, 0.0));
        assert_close(flipped.point_at(0.5), Vector2::new(0.5, 0.5));
        assert_close(flipped.point_at(1.0), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_arc_rotation_transform() {
        let arc = CircularArc {
            center: Vector2::ZERO,
            radius: 1.0,
            start: 0.0,
            extent: -90.0,
        };
        let mut t = Transform2D::identity();
        t.rotate(std::f64::consts::FRAC_PI_2);
        let rotated = match Shape::Arc(arc).transform(&t) {
            Shape::Arc(a) => a,
            other => panic!("expected arc, got {:?}", other),
        };
        // (1,0) rotates to (0,1); (0,1) rotates to (-1,0)
        assert_close(rotated.point_at(0.0), Vector2::new(0.0, 1.0));
        assert_close(rotated.point_at(1.0), Vector2::new(-1.0, 0.0));
    }

    #[test]
    fn test_arc_nonuniform_scale_becomes_elliptical() {
        let arc = CircularArc {
            center: Vector2::ZERO,
            radius: 1.0,
            start: 0.0,
            extent: -90.0,
        };
        let mut t = Transform2D::identity();
        t.scale(2.0, 1.0);
        let shape = Shape::Arc(arc).transform(&t);
        let path = match shape {
            Shape::Path(p) => p,
            other => panic!("expected path, got {:?}", other),
        };
        let ea = path
            .commands
            .iter()
            .find_map(|c| match c {
                PathCommand::EllipticalArc(e) => Some(*e),
                _ => None,
            })
            .expect("elliptical arc command");
        assert_close(ea.point_at(0.0), Vector2::new(2.0, 0.0));
        assert_close(ea.point_at(1.0), Vector2::new(0.0, 1.0));
    }

    #[test]
    fn test_ellipse_bounds_rotated() {
        // 2x1 ellipse rotated 90 degrees swaps its extents
        let e = EllipseShape {
            center: Vector2::ZERO,
            rx: 2.0,
            ry: 1.0,
            rotation: std::f64::consts::FRAC_PI_2,
        };
        let b = e.bounds();
        assert!((b.width() - 2.0).abs() < 1e-9);
        assert!((b.height() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_circle_bounds_and_transform() {
        let c = CircleShape {
            center: Vector2::new(1.0, 1.0),
            radius: 2.0,
        };
        assert_eq!(c.bounds().width(), 4.0);

        let mut t = Transform2D::identity();
        t.scale(3.0, 3.0);
        match Shape::Circle(c).transform(&t) {
            Shape::Circle(c2) => {
                assert!((c2.radius - 6.0).abs() < 1e-9);
                assert_close(c2.center, Vector2::new(3.0, 3.0));
            }
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_flatten_quarter_arc() {
        let arc = CircularArc {
            center: Vector2::ZERO,
            radius: 1.0,
            start: 0.0,
            extent: -90.0,
        };
        let mut commands = Vec::new();
        arc.flatten_into(&mut commands);
        assert_eq!(commands.len(), 1);
        match &commands[0] {
            PathCommand::CurveTo { c1, c2, to } => {
                assert_close(*to, Vector2::new(0.0, 1.0));
                let k = 4.0 / 3.0 * (std::f64::consts::FRAC_PI_2 / 4.0).tan();
                assert_close(*c1, Vector2::new(1.0, k));
                assert_close(*c2, Vector2::new(k, 1.0));
            }
            other => panic!("expected curve, got {:?}", other),
        }
    }
}
