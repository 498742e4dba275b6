//! Configuration file support for shotmark.
//!
//! Settings are read from `~/.config/shotmark/config.toml`. They cover the
//! style of new annotations, the display area, where finished screenshots are
//! written, and keyboard shortcuts.
//!
//! If no config file exists, defaults are used.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{DrawingConfig, OutputConfig, ViewportConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::delivery::FileSaveConfig;
use crate::delivery::file::{expand_tilde, is_valid_template};
use crate::draw::FontDescriptor;
use crate::input::state::FONT_SIZE_RANGE;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#ff3b3b"
/// default_thickness = 3
/// default_font_size = 16.0
///
/// [viewport]
/// max_width = 1600
/// max_height = 1000
///
/// [output]
/// save_directory = "~/Pictures/Shotmark"
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Style of new annotations
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Available display area
    #[serde(default)]
    pub viewport: ViewportConfig,

    /// File output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are replaced by the nearest valid value and a warning is
    /// logged.
    ///
    /// Validated ranges:
    /// - `default_thickness`: 1 - 20
    /// - `default_font_size`: 8.0 - 72.0
    /// - `max_width` / `max_height`: at least 1
    /// - `filename_template`: non-empty, only known chrono specifiers
    pub fn validate_and_clamp(&mut self) {
        // Thickness: 1 - 20
        if !(1..=20).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {}, clamping to 1-20 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(1, 20);
        }

        // Font size: 8.0 - 72.0
        let (min_font, max_font) = FONT_SIZE_RANGE;
        if !(min_font..=max_font).contains(&self.drawing.default_font_size) {
            log::warn!(
                "Invalid default_font_size {:.1}, clamping to {:.1}-{:.1} range",
                self.drawing.default_font_size,
                min_font,
                max_font
            );
            self.drawing.default_font_size = if self.drawing.default_font_size.is_nan() {
                16.0
            } else {
                self.drawing.default_font_size.clamp(min_font, max_font)
            };
        }

        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "medium" | "semibold" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'semibold'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "semibold".to_string();
        }

        if self.drawing.font_family.trim().is_empty() {
            log::warn!("Empty font_family, falling back to 'Sans'");
            self.drawing.font_family = "Sans".to_string();
        }

        if self.viewport.max_width == 0 || self.viewport.max_height == 0 {
            log::warn!(
                "Invalid viewport {}x{}, using at least 1 pixel per side",
                self.viewport.max_width,
                self.viewport.max_height
            );
            self.viewport.max_width = self.viewport.max_width.max(1);
            self.viewport.max_height = self.viewport.max_height.max(1);
        }

        if !is_valid_template(&self.output.filename_template) {
            let fallback = OutputConfig::default().filename_template;
            log::warn!(
                "Invalid filename_template '{}', falling back to '{}'",
                self.output.filename_template,
                fallback
            );
            self.output.filename_template = fallback;
        }
    }

    /// Font used for text labels.
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.drawing.font_family.clone(),
            self.drawing.font_weight.clone(),
        )
    }

    /// File output settings with `~/` expanded.
    pub fn file_save_config(&self) -> FileSaveConfig {
        FileSaveConfig {
            save_directory: expand_tilde(&self.output.save_directory),
            filename_template: self.output.filename_template.clone(),
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("shotmark");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from `config_path`, or returns defaults if the file
    /// does not exist. All loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
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

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}
