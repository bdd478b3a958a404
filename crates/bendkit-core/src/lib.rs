//! # BendKit Core
//!
//! Core types and utilities for BendKit.
//! Provides the 2D vector value type, the error taxonomy shared by the
//! path compiler and editor, and numeric formatting helpers.

pub mod constants;
pub mod error;
pub mod units;
pub mod vector;

pub use constants::GEOMETRY_EPSILON;
pub use error::{BendError, BendResult, Error, Result};
pub use units::{deg2rad, format_length, format_number, rad2deg, sign, MeasurementSystem};
pub use vector::Vector2;
