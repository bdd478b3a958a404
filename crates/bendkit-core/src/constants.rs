//! Shared tolerances.

/// Coordinate tolerance for vertex de-duplication and colinearity checks.
pub const GEOMETRY_EPSILON: f64 = 1e-8;

/// Default pen start position.
pub const DEFAULT_POSITION: (f64, f64) = (0.0, 0.0);

/// Default pen heading (+x).
pub const DEFAULT_DIRECTION: (f64, f64) = (1.0, 0.0);
