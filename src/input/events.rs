//! Input event types consumed by the editor.

use serde::{Deserialize, Serialize};

use super::tool::Tool;

/// Generic key representation.
///
/// Hosts map their native key codes to these values. In scripted event files
/// keys are written by name (`"Escape"`, `"Ctrl"`, `"a"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Tab key
    Tab,
    /// Space bar
    Space,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Parses a key name. Single characters become [`Key::Char`].
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return if c == ' ' { Key::Space } else { Key::Char(c) };
        }

        match name.to_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Space,
            "shift" => Key::Shift,
            "ctrl" | "control" => Key::Ctrl,
            "alt" => Key::Alt,
            _ => Key::Unknown,
        }
    }

    /// Name used for keybinding lookup, or `None` for keys that never bind.
    pub fn binding_name(&self) -> Option<String> {
        let name = match self {
            Key::Char(c) => return Some(c.to_string()),
            Key::Escape => "Escape",
            Key::Return => "Return",
            Key::Backspace => "Backspace",
            Key::Delete => "Delete",
            Key::Tab => "Tab",
            Key::Space => "Space",
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => return None,
        };
        Some(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::from_name(&name)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        match key {
            Key::Shift => "Shift".to_string(),
            Key::Ctrl => "Ctrl".to_string(),
            Key::Alt => "Alt".to_string(),
            Key::Unknown => "Unknown".to_string(),
            other => other.binding_name().unwrap_or_default(),
        }
    }
}

/// A discrete input event in display coordinates.
///
/// Serialized with a `type` tag so a session can be scripted:
/// ```toml
/// [[events]]
/// type = "set-tool"
/// tool = "rect"
///
/// [[events]]
/// type = "pointer-down"
/// x = 10.0
/// y = 10.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum InputEvent {
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp { x: f64, y: f64 },
    DoubleClick { x: f64, y: f64 },
    KeyPress { key: Key },
    KeyRelease { key: Key },
    /// Presses each character of `text` in turn.
    Type { text: String },
    /// Confirms the open text draft.
    Commit,
    /// Discards the open text draft.
    Cancel,
    /// The text overlay lost focus.
    Blur,
    SetTool { tool: Tool },
    /// Color as a name or `#rrggbb` hex string.
    SetColor { color: String },
    SetStrokeWidth { width: u32 },
    SetFontSize { size: f64 },
    Undo,
    Clear,
    Delete,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_round_trip() {
        for key in [Key::Escape, Key::Return, Key::Delete, Key::Ctrl, Key::Char('x')] {
            let name: String = key.into();
            assert_eq!(Key::from_name(&name), key);
        }
        assert_eq!(Key::from_name("enter"), Key::Return);
        assert_eq!(Key::from_name(" "), Key::Space);
        assert_eq!(Key::from_name("F13"), Key::Unknown);
    }

    #[test]
    fn events_parse_from_toml() {
        #[derive(Deserialize)]
        struct Script {
            events: Vec<InputEvent>,
        }

        let script: Script = toml::from_str(
            r##"
            [[events]]
            type = "set-tool"
            tool = "rectangle"

            [[events]]
            type = "pointer-down"
            x = 10.0
            y = 12.5

            [[events]]
            type = "key-press"
            key = "Escape"

            [[events]]
            type = "set-color"
            color = "#00ff00"

            [[events]]
            type = "undo"
            "##,
        )
        .unwrap();

        assert_eq!(
            script.events,
            vec![
                InputEvent::SetTool { tool: Tool::Rect },
                InputEvent::PointerDown { x: 10.0, y: 12.5 },
                InputEvent::KeyPress { key: Key::Escape },
                InputEvent::SetColor {
                    color: "#00ff00".to_string()
                },
                InputEvent::Undo,
            ]
        );
    }
}
