//! Configuration file support for shapecanvas.
//!
//! This module handles loading and validating settings from the configuration
//! file located at `~/.config/shapecanvas/config.toml`. Settings cover the
//! surface geometry, pointer interaction thresholds and debugging aids.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{DebugConfig, InteractionConfig, SurfaceConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [surface]
/// width = 1024
/// height = 768
/// pixel_ratio = 2.0
/// background = "white"
///
/// [interaction]
/// click_distance = 3.0
/// hit_stroke_padding = 2.0
///
/// [debug]
/// show_hit_canvas = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Surface size, display scale and background
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Click and hit-test tuning
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Debugging aids
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is
    /// logged.
    ///
    /// Validated ranges:
    /// - `surface.width`, `surface.height`: 1.0 - 16384.0
    /// - `surface.pixel_ratio`: 0.5 - 4.0
    /// - `interaction.click_distance`: 0.0 - 50.0
    /// - `interaction.hit_stroke_padding`: 0.0 - 20.0
    pub fn validate_and_clamp(&mut self) {
        // Surface size: 1.0 - 16384.0
        if !(1.0..=16384.0).contains(&self.surface.width) {
            log::warn!(
                "Invalid surface width {:.1}, clamping to 1.0-16384.0 range",
                self.surface.width
            );
            self.surface.width = clamp_or(self.surface.width, 1.0, 16384.0, 800.0);
        }
        if !(1.0..=16384.0).contains(&self.surface.height) {
            log::warn!(
                "Invalid surface height {:.1}, clamping to 1.0-16384.0 range",
                self.surface.height
            );
            self.surface.height = clamp_or(self.surface.height, 1.0, 16384.0, 600.0);
        }

        // Pixel ratio: 0.5 - 4.0
        if !(0.5..=4.0).contains(&self.surface.pixel_ratio) {
            log::warn!(
                "Invalid pixel_ratio {:.2}, clamping to 0.5-4.0 range",
                self.surface.pixel_ratio
            );
            self.surface.pixel_ratio = clamp_or(self.surface.pixel_ratio, 0.5, 4.0, 1.0);
        }

        // Click distance: 0.0 - 50.0
        if !(0.0..=50.0).contains(&self.interaction.click_distance) {
            log::warn!(
                "Invalid click_distance {:.1}, clamping to 0.0-50.0 range",
                self.interaction.click_distance
            );
            self.interaction.click_distance =
                clamp_or(self.interaction.click_distance, 0.0, 50.0, 3.0);
        }

        // Hit stroke padding: 0.0 - 20.0
        if !(0.0..=20.0).contains(&self.interaction.hit_stroke_padding) {
            log::warn!(
                "Invalid hit_stroke_padding {:.1}, clamping to 0.0-20.0 range",
                self.interaction.hit_stroke_padding
            );
            self.interaction.hit_stroke_padding =
                clamp_or(self.interaction.hit_stroke_padding, 0.0, 20.0, 0.0);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/shapecanvas/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("shapecanvas");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the
    /// file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Serializes the config to TOML and writes it to `config_path`, creating
    /// the parent directory if needed.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

/// Clamps `value` into `min..=max`, replacing NaN with `fallback`.
fn clamp_or(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
