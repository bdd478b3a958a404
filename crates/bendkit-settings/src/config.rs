//! Configuration management for BendKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, with the default file stored in the platform config
//! directory.
//!
//! Configuration is organized into logical sections:
//! - Pen settings (starting position and heading of new bends)
//! - Output preferences (y-axis orientation, units, JSON layout)
//! - Editing defaults (bend angle and split ratio for inserted bends)

pub use bendkit_core::units::MeasurementSystem;
use bendkit_core::Vector2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, SettingsError, SettingsResult};

/// Starting pose for bends created without an explicit one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenSettings {
    /// Where the pen starts
    pub initial_position: Vector2,
    /// Initial heading; need not be unit length
    pub initial_direction: Vector2,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            initial_position: Vector2::ZERO,
            initial_direction: Vector2::X,
        }
    }
}

/// Output preferences
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSettings {
    /// Mirror printed paths for y-down renderers
    pub invert_y: bool,
    /// Units used when displaying lengths
    pub measurement_system: MeasurementSystem,
    /// Indent JSON output
    pub pretty_json: bool,
}

/// Defaults for structural edits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditingSettings {
    /// Angle of a newly inserted bend, in degrees
    pub default_bend_angle: f64,
    /// Where along a straight a new bend is inserted, in [0, 1]
    pub default_split_ratio: f64,
}

impl Default for EditingSettings {
    fn default() -> Self {
        Self {
            default_bend_angle: 90.0,
            default_split_ratio: 0.5,
        }
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Pen settings
    pub pen: PenSettings,
    /// Output preferences
    pub output: OutputSettings,
    /// Editing defaults
    pub editing: EditingSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        let pen = &self.pen;
        if !pen.initial_position.is_finite() {
            return Err(ConfigError::out_of_range(
                "pen.initial_position",
                pen.initial_position,
            ));
        }
        if !pen.initial_direction.is_finite() || pen.initial_direction == Vector2::ZERO {
            return Err(ConfigError::out_of_range(
                "pen.initial_direction",
                pen.initial_direction,
            ));
        }

        let editing = &self.editing;
        if !editing.default_bend_angle.is_finite() {
            return Err(ConfigError::out_of_range(
                "editing.default_bend_angle",
                editing.default_bend_angle,
            ));
        }
        if !(0.0..=1.0).contains(&editing.default_split_ratio) {
            return Err(ConfigError::out_of_range(
                "editing.default_split_ratio",
                editing.default_split_ratio,
            ));
        }

        Ok(())
    }

    /// `<config_dir>/bendkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("bendkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory(
                    "no configuration directory on this platform".to_string(),
                )
            })
    }

    /// Load the default config file, or defaults when there is none.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = match Self::default_path() {
            Ok(path) => path,
            Err(err) => {
                debug!(%err, "using default config");
                return Ok(Self::default());
            }
        };
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }
}
