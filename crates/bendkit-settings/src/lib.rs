//! BendKit Settings Crate
//!
//! Handles configuration files: default pen pose, output options and
//! editing defaults, persisted as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, EditingSettings, OutputSettings, PenSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
