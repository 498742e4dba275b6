//! Editing tool selection.

use serde::{Deserialize, Serialize};

/// Editing tool selection.
///
/// The active tool decides what a pointer-down does: pick and drag an existing
/// annotation, start a rectangle or arrow, or open a text draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Pick, drag, and double-click to edit text labels (default)
    #[default]
    Select,
    /// Rectangle outline - from corner to corner
    #[serde(alias = "rectangle")]
    Rect,
    /// Arrow from press point to release point
    Arrow,
    /// Text label at the click point
    Text,
}
