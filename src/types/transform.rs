//! 2D affine transforms
//!
//! `Transform2D` mutators follow the concatenation convention of common
//! 2D graphics toolkits: `translate`/`scale`/`rotate` post-concatenate, so a
//! sequence `t.translate(..); t.scale(..); t.rotate(..)` applies the rotation
//! to a point first and the translation last.

use super::Vector2;

/// 2D affine transform
///
/// ```text
/// | m11 m12 dx |
/// | m21 m22 dy |
/// |  0   0   1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub dx: f64,
    pub dy: f64,
}

/// Decomposition of a conformal (angle-preserving) linear part:
/// `M = s·R(angle)` or, when `reflected`, `M = s·R(angle)·diag(1, −1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conformal {
    /// Uniform scale factor (non-negative)
    pub scale: f64,
    /// Rotation angle in radians, counterclockwise
    pub angle: f64,
    /// Whether the transform reverses orientation
    pub reflected: bool,
}

/// Classification of the linear part of a transform, used to decide whether
/// circular and elliptical arc segments can stay parametric or must be
/// flattened to Bezier curves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinearClass {
    /// Uniform scale + rotation, optionally reflected
    Conformal(Conformal),
    /// Positive per-axis scaling with no rotation or shear
    Diagonal { sx: f64, sy: f64 },
    /// Anything else (shear, non-uniform scale with rotation, ...)
    General,
}

impl Transform2D {
    /// Identity transform
    pub fn identity() -> Self {
        Transform2D {
            m11: 1.0,
            m12: 0.0,
            m21: 0.0,
            m22: 1.0,
            dx: 0.0,
            dy: 0.0,
        }
    }

    /// Pure translation
    pub fn from_translation(tx: f64, ty: f64) -> Self {
        Transform2D {
            dx: tx,
            dy: ty,
            ..Self::identity()
        }
    }

    /// Apply the transform to a point
    pub fn apply(&self, p: Vector2) -> Vector2 {
        Vector2::new(
            self.m11 * p.x + self.m12 * p.y + self.dx,
            self.m21 * p.x + self.m22 * p.y + self.dy,
        )
    }

    /// Post-concatenate another transform: `self = self ∘ other`
    pub fn concat(&mut self, other: &Transform2D) {
        let r11 = self.m11 * other.m11 + self.m12 * other.m21;
        let r12 = self.m11 * other.m12 + self.m12 * other.m22;
        let r21 = self.m21 * other.m11 + self.m22 * other.m21;
        let r22 = self.m21 * other.m12 + self.m22 * other.m22;
        let rdx = self.m11 * other.dx + self.m12 * other.dy + self.dx;
        let rdy = self.m21 * other.dx + self.m22 * other.dy + self.dy;
        *self = Transform2D {
            m11: r11,
            m12: r12,
            m21: r21,
            m22: r22,
            dx: rdx,
            dy: rdy,
        };
    }

    /// Post-concatenate a translation
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.concat(&Self::from_translation(tx, ty));
    }

    /// Post-concatenate a per-axis scale
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.concat(&Transform2D {
            m11: sx,
            m22: sy,
            ..Self::identity()
        });
    }

    /// Post-concatenate a counterclockwise rotation (radians)
    pub fn rotate(&mut self, angle: f64) {
        let (sin, cos) = angle.sin_cos();
        self.concat(&Transform2D {
            m11: cos,
            m12: -sin,
            m21: sin,
            m22: cos,
            dx: 0.0,
            dy: 0.0,
        });
    }

    /// Classify the linear part
    pub fn classify(&self) -> LinearClass {
        let mag = self.m11.abs() + self.m12.abs() + self.m21.abs() + self.m22.abs();
        let tol = mag * 1e-9 + 1e-12;

        if (self.m11 - self.m22).abs() <= tol && (self.m12 + self.m21).abs() <= tol {
            return LinearClass::Conformal(Conformal {
                scale: self.m11.hypot(self.m21),
                angle: self.m21.atan2(self.m11),
                reflected: false,
            });
        }
        if (self.m11 + self.m22).abs() <= tol && (self.m12 - self.m21).abs() <= tol {
            return LinearClass::Conformal(Conformal {
                scale: self.m11.hypot(self.m12),
                angle: self.m12.atan2(self.m11),
                reflected: true,
            });
        }
        if self.m12.abs() <= tol && self.m21.abs() <= tol && self.m11 > 0.0 && self.m22 > 0.0 {
            return LinearClass::Diagonal {
                sx: self.m11,
                sy: self.m22,
            };
        }
        LinearClass::General
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}
