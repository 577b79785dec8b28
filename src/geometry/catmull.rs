//! Catmull-Rom to cubic Bezier conversion.

use crate::types::Vector2;

/// Convert one Catmull-Rom span (`p1` → `p2`, with neighbors `p0` and `p3`)
/// into the control points and end point of a cubic Bezier segment.
///
/// Conversion matrix:
///
/// ```text
///    0       1       0       0
///  -1/6      1      1/6      0
///    0      1/6      1     -1/6
///    0       0       1       0
/// ```
pub fn catmull_rom_to_bezier(
    p0: Vector2,
    p1: Vector2,
    p2: Vector2,
    p3: Vector2,
) -> (Vector2, Vector2, Vector2) {
    let c1 = Vector2::new(
        (-p0.x + 6.0 * p1.x + p2.x) / 6.0,
        (-p0.y + 6.0 * p1.y + p2.y) / 6.0,
    );
    let c2 = Vector2::new(
        (p1.x + 6.0 * p2.x - p3.x) / 6.0,
        (p1.y + 6.0 * p2.y - p3.y) / 6.0,
    );
    (c1, c2, p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_run_stays_straight() {
        // collinear equally spaced points produce collinear control points
        let p = |x: f64| Vector2::new(x, 0.0);
        let (c1, c2, end) = catmull_rom_to_bezier(p(0.0), p(1.0), p(2.0), p(3.0));
        assert_eq!(c1, Vector2::new(4.0 / 3.0, 0.0));
        assert_eq!(c2, Vector2::new(5.0 / 3.0, 0.0));
        assert_eq!(end, p(2.0));
    }

    #[test]
    fn test_c1_continuity_between_spans() {
        // for consecutive spans, the tangent out of the shared point equals
        // the tangent into it: p2 - c2(prev) == c1(next) - p2
        let pts = [
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 2.0),
            Vector2::new(3.0, 1.0),
            Vector2::new(4.0, 4.0),
            Vector2::new(6.0, 0.0),
        ];
        let (_, c2a, enda) = catmull_rom_to_bezier(pts[0], pts[1], pts[2], pts[3]);
        let (c1b, _, _) = catmull_rom_to_bezier(pts[1], pts[2], pts[3], pts[4]);
        let out = enda - c2a;
        let inn = c1b - enda;
        assert!((out.x - inn.x).abs() < 1e-12);
        assert!((out.y - inn.y).abs() < 1e-12);
    }
}
