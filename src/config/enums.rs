//! Configuration enum types.

use crate::draw::{Color, color::SNAP_RED};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a named color, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// default_color = "red"
///
/// # Hex color
/// default_color = "#ff3b3b"
///
/// # Custom RGB color (0-255 per component)
/// default_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (red, green, blue, yellow, orange, white, black) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Parses a name or hex string, returning `None` if it is neither.
    pub fn parse(value: &str) -> Option<Color> {
        let value = value.trim();
        if value.starts_with('#') {
            Color::from_hex(value)
        } else {
            crate::draw::color::name_to_color(value)
        }
    }

    /// Converts the color specification to a [`Color`] struct.
    ///
    /// Unknown names fall back to the default annotation red with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => Self::parse(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using default red", name);
                SNAP_RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}
