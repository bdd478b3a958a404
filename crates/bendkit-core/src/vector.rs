//! Immutable 2D vector used for pen positions and directions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::units::deg2rad;

/// A point or direction in the bending plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Rotates counter-clockwise by `radians`.
    pub fn rotate(self, radians: f64) -> Self {
        let (sin, cos) = (radians.sin(), radians.cos());
        Self::new(cos * self.x - sin * self.y, sin * self.x + cos * self.y)
    }

    /// Rotates counter-clockwise by `degrees`.
    pub fn rotate_deg(self, degrees: f64) -> Self {
        self.rotate(deg2rad(degrees))
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product.
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction; the zero vector stays zero.
    pub fn normalize(self) -> Self {
        let len = self.magnitude();
        if len <= 0.0 {
            Self::ZERO
        } else {
            self.scale(1.0 / len)
        }
    }

    pub fn distance(self, other: Self) -> f64 {
        self.subtract(other).magnitude()
    }

    /// Heading in radians, measured from +x.
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn angle_deg(self) -> f64 {
        crate::units::rad2deg(self.angle())
    }

    pub fn midpoint(self, other: Self) -> Self {
        self.add(other.subtract(self).scale(0.5))
    }

    /// Mirror across the x axis.
    pub fn invert_y(self) -> Self {
        Self::new(self.x, -self.y)
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector2::add(self, rhs)
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<(f64, f64)> for Vector2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            crate::units::format_number(self.x),
            crate::units::format_number(self.y)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Vector2::X.rotate_deg(90.0);
        assert!(v.approx_eq(Vector2::new(0.0, 1.0), 1e-12));
    }

    #[test]
    fn test_normalize_zero() {
        assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
        let n = Vector2::new(3.0, 4.0).normalize();
        assert!((n.magnitude() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cross_sign() {
        assert!(Vector2::X.cross(Vector2::new(0.0, 1.0)) > 0.0);
        assert!(Vector2::X.cross(Vector2::new(0.0, -1.0)) < 0.0);
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = Vector2::new(0.0, 0.0);
        let b = Vector2::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.midpoint(b), Vector2::new(1.5, 2.0));
    }

    #[test]
    fn test_display_uses_path_formatting() {
        assert_eq!(Vector2::new(5.0, -0.0).to_string(), "5 0");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&Vector2::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.0}"#);
        let back: Vector2 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Vector2::new(1.5, -2.0));
    }
}
