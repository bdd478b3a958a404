//! Numeric helpers and unit display
//!
//! Angle conversion, path-number formatting and metric/imperial display of
//! developed lengths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Degrees to radians.
pub fn deg2rad(degrees: f64) -> f64 {
    degrees * (std::f64::consts::PI / 180.0)
}

/// Radians to degrees.
pub fn rad2deg(radians: f64) -> f64 {
    radians * (180.0 / std::f64::consts::PI)
}

/// Sign of `value` as -1, 0 or 1 (zero stays zero).
pub fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Format a number the way path strings carry them.
///
/// Shortest round-trip decimal, `-0` as `0`, and exponent notation outside
/// `[1e-6, 1e21)`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let abs = value.abs();
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{:e}", value);
        return match s.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => s,
        };
    }

    format!("{}", value)
}

/// Measurement system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    /// Metric system (mm)
    #[default]
    Metric,
    /// Imperial system (inches)
    Imperial,
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric => write!(f, "Metric"),
            Self::Imperial => write!(f, "Imperial"),
        }
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "mm" => Ok(Self::Metric),
            "imperial" | "inch" | "in" => Ok(Self::Imperial),
            _ => Err(format!("Unknown measurement system: {}", s)),
        }
    }
}

/// Format length value for display
///
/// * `value_mm` - Value in millimeters
/// * `system` - Target measurement system
pub fn format_length(value_mm: f64, system: MeasurementSystem) -> String {
    match system {
        MeasurementSystem::Metric => format!("{:.3} mm", value_mm),
        MeasurementSystem::Imperial => format!("{:.3} in", value_mm / 25.4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_plain() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.4644660940672627), "1.4644660940672627");
        assert_eq!(format_number(-135.0), "-135");
        assert_eq!(format_number(2.5), "2.5");
    }

    #[test]
    fn test_format_number_exponent() {
        assert_eq!(format_number(3.061616997868383e-16), "3.061616997868383e-16");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_sign_of_zero() {
        assert_eq!(sign(0.0), 0.0);
        assert_eq!(sign(-3.0), -1.0);
        assert_eq!(sign(90.0), 1.0);
    }

    #[test]
    fn test_format_length() {
        assert_eq!(format_length(25.4, MeasurementSystem::Imperial), "1.000 in");
        assert_eq!(format_length(12.5, MeasurementSystem::Metric), "12.500 mm");
        assert_eq!("mm".parse::<MeasurementSystem>(), Ok(MeasurementSystem::Metric));
    }
}
