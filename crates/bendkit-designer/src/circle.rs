//! Circle recovery from bulge-encoded arcs.

use bendkit_core::Vector2;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// Center and radius of the circle carrying an arc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcCircle {
    pub center: Vector2,
    pub radius: f64,
}

/// Fit the circle through `a`, `b` and the sagitta point implied by `bulge`.
///
/// Uses the three-point determinant form: rows `[x²+y², x, y, 1]`, with the
/// center and radius read off the 3x3 minors. Returns `None` for coincident
/// endpoints or a straight (zero-bulge) segment.
pub fn sagitta_arc(a: Vector2, b: Vector2, bulge: f64) -> Option<ArcCircle> {
    let normal = Vector2::new(b.y - a.y, a.x - b.x);
    let chord = normal.magnitude();
    if chord == 0.0 || bulge == 0.0 {
        return None;
    }

    let sagitta = bulge * (chord / 2.0);
    let c = a.midpoint(b).add(normal.scale(sagitta / chord));

    let rows = [a, b, c].map(|p| [p.dot(p), p.x, p.y, 1.0]);
    let minor = |columns: [usize; 3]| {
        Matrix3::from_fn(|row, col| rows[row][columns[col]]).determinant()
    };

    let m11 = minor([1, 2, 3]);
    if m11 == 0.0 {
        return None;
    }
    let m12 = minor([0, 2, 3]);
    let m13 = minor([0, 1, 3]);
    let m14 = minor([0, 1, 2]);

    let center = Vector2::new(0.5 * (m12 / m11), -0.5 * (m13 / m11));
    let radius = (center.dot(center) + m14 / m11).sqrt();

    Some(ArcCircle { center, radius })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quarter_arc_circle() {
        let bulge = (std::f64::consts::PI / 8.0).tan();
        let circle = sagitta_arc(Vector2::new(4.0, 0.0), Vector2::new(5.0, 1.0), bulge).unwrap();
        assert!((circle.radius - 1.0).abs() < 1e-9);
        assert!(circle.center.approx_eq(Vector2::new(4.0, 1.0), 1e-9));
    }

    #[test]
    fn test_semicircle() {
        let circle = sagitta_arc(Vector2::new(-2.0, 0.0), Vector2::new(2.0, 0.0), 1.0).unwrap();
        assert!((circle.radius - 2.0).abs() < 1e-9);
        assert!(circle.center.approx_eq(Vector2::ZERO, 1e-9));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(sagitta_arc(Vector2::ZERO, Vector2::ZERO, 0.5).is_none());
        assert!(sagitta_arc(Vector2::ZERO, Vector2::X, 0.0).is_none());
    }
}
