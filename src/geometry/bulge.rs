//! Bulge factor to circular arc conversion.
//!
//! A polyline vertex may carry a bulge factor `b = tan(θ/4)` where θ is the
//! included angle of the arc that replaces the straight edge to the next
//! vertex. Positive bulge sweeps clockwise in the emitted arc convention.

use super::shape::CircularArc;
use crate::types::Vector2;

/// Construct the circular arc from `p1` to `p2` implied by a bulge factor.
pub fn bulge_arc(p1: Vector2, p2: Vector2, bulge: f64) -> CircularArc {
    let u = p1.distance(&p2);
    if u == 0.0 {
        return CircularArc {
            center: p1,
            radius: 0.0,
            start: 0.0,
            extent: 0.0,
        };
    }
    let mp = p1.midpoint(&p2);
    // Apex of the arc: midpoint displaced along the chord perpendicular
    let bp = Vector2::new(mp.x - (p1.y - mp.y) * bulge, mp.y + (p1.x - mp.x) * bulge);
    let b = 2.0 * mp.distance(&bp) / u;
    let radius = u * ((1.0 + b * b) / (4.0 * b));
    let dir = (mp - bp).normalize();
    let center = bp + dir * radius;
    let start = 180.0 - (center.y - p1.y).atan2(center.x - p1.x).to_degrees();
    let extent = ((u / 2.0) / radius).asin().to_degrees() * 2.0;
    CircularArc {
        center,
        radius,
        start,
        extent: if bulge >= 0.0 { -extent } else { extent },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector2, b: Vector2) {
        assert!(
            (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6,
            "{} != {}",
            a,
            b
        );
    }

    #[test]
    fn test_half_circle() {
        // bulge 1 is a semicircle; counterclockwise in drawing terms, so the
        // apex is below the chord
        let arc = bulge_arc(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), 1.0);
        assert!((arc.radius - 0.5).abs() < 1e-9);
        assert_close(arc.center, Vector2::new(0.5, 0.0));
        assert!((arc.extent.abs() - 180.0).abs() < 1e-9);
        assert_close(arc.point_at(0.0), Vector2::new(0.0, 0.0));
        assert_close(arc.point_at(0.5), Vector2::new(0.5, -0.5));
        assert_close(arc.point_at(1.0), Vector2::new(1.0, 0.0));
    }

    #[test]
    fn test_negative_bulge_mirrors() {
        let arc = bulge_arc(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), -1.0);
        assert_close(arc.point_at(0.5), Vector2::new(0.5, 0.5));
    }

    #[test]
    fn test_shallow_bulge_radius() {
        // bulge = tan(θ/4); θ = 90° gives bulge ≈ 0.41421, chord 1,
        // radius = 1/(2·sin(45°))
        let bulge = (std::f64::consts::FRAC_PI_4 / 2.0).tan();
        let arc = bulge_arc(Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), bulge);
        let expected = 1.0 / (2.0 * (std::f64::consts::FRAC_PI_4).sin());
        assert!((arc.radius - expected).abs() < 1e-9);
        assert!((arc.extent.abs() - 90.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_chord() {
        let arc = bulge_arc(Vector2::new(1.0, 1.0), Vector2::new(1.0, 1.0), 0.5);
        assert_eq!(arc.radius, 0.0);
        assert_eq!(arc.extent, 0.0);
    }
}
