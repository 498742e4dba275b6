//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the style of new annotations when the editor opens.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default annotation color - a named color, a `#rrggbb` hex string,
    /// or an RGB array like `[255, 59, 59]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 1 - 20)
    #[serde(default = "default_thickness")]
    pub default_thickness: u32,

    /// Default font size for text labels in pixels (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Font family name for text labels (e.g., "Sans", "Inter")
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "semibold", "bold", or 100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_thickness: default_thickness(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
        }
    }
}

/// Space available for showing the image.
///
/// Images larger than this are scaled down for display; smaller ones are
/// never enlarged.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ViewportConfig {
    /// Maximum display width in pixels
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    /// Maximum display height in pixels
    #[serde(default = "default_max_height")]
    pub max_height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
        }
    }
}

/// Where finished screenshots are written.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OutputConfig {
    /// Output directory; `~/` is expanded
    #[serde(default = "default_save_directory")]
    pub save_directory: String,

    /// Base filename with chrono format specifiers; `.png` and `.md` are appended
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            save_directory: default_save_directory(),
            filename_template: default_filename_template(),
        }
    }
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("#ff3b3b".to_string())
}

fn default_thickness() -> u32 {
    3
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "semibold".to_string()
}

fn default_max_width() -> u32 {
    1600
}

fn default_max_height() -> u32 {
    1000
}

fn default_save_directory() -> String {
    "~/Pictures/Shotmark".to_string()
}

fn default_filename_template() -> String {
    "shotmark_%Y-%m-%d_%H%M%S".to_string()
}
