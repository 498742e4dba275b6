//! Text label entry: creating new labels and editing existing ones.

use crate::draw::Annotation;
use crate::input::events::Key;

use super::{DrawingState, InputState};

/// Transient text-entry overlay.
///
/// Nothing is written to the annotation list until the draft is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    /// Baseline anchor of the label
    pub x: f64,
    pub y: f64,
    /// Label being edited, or `None` for a new label
    pub target: Option<usize>,
    /// Draft text
    pub buffer: String,
}

impl InputState {
    /// Opens a text draft at (x, y), optionally pre-filled from an existing label.
    pub(super) fn begin_text_edit(&mut self, x: f64, y: f64, target: Option<usize>, text: String) {
        log::debug!(
            "Text entry at ({:.1}, {:.1}){}",
            x,
            y,
            target.map(|i| format!(" editing {}", i)).unwrap_or_default()
        );
        self.state = DrawingState::TextInput(TextEditSession {
            x,
            y,
            target,
            buffer: text,
        });
        self.needs_redraw = true;
    }

    /// The open text draft, if any.
    pub fn text_session(&self) -> Option<&TextEditSession> {
        match &self.state {
            DrawingState::TextInput(session) => Some(session),
            _ => None,
        }
    }

    /// Commits the open draft.
    ///
    /// The draft is trimmed; empty drafts are discarded. A new label takes the
    /// current color and font size, an edited label takes the new text and the
    /// current color. Returns `true` when the document changed.
    pub fn commit_text(&mut self) -> bool {
        let DrawingState::TextInput(session) =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return false;
        };
        self.needs_redraw = true;

        let text = session.buffer.trim();
        if text.is_empty() {
            log::debug!("Discarding empty text draft");
            return false;
        }

        match session.target {
            Some(index) => match self.frame.get_mut(index) {
                Some(Annotation::Text {
                    text: existing,
                    color,
                    ..
                }) => {
                    *existing = text.to_string();
                    *color = self.current_color;
                    log::debug!("Updated text label {}", index);
                    true
                }
                _ => {
                    log::warn!("Text edit target {} is no longer a label", index);
                    false
                }
            },
            None => {
                self.frame.append(Annotation::Text {
                    x: session.x,
                    y: session.y,
                    text: text.to_string(),
                    color: self.current_color,
                    font_size: self.current_font_size,
                });
                log::debug!("Committed text label");
                true
            }
        }
    }

    /// Discards the open draft without touching the document.
    pub fn cancel_text(&mut self) -> bool {
        if !matches!(self.state, DrawingState::TextInput(_)) {
            return false;
        }
        log::debug!("Text draft cancelled");
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
        true
    }

    /// The text overlay lost focus; behaves like an explicit commit.
    pub fn on_blur(&mut self) -> bool {
        self.commit_text()
    }

    /// Applies an editing key to the open draft.
    ///
    /// Returns `false` if the key has no meaning for text entry.
    pub(super) fn handle_text_key(&mut self, key: Key) -> bool {
        match key {
            Key::Return => {
                self.commit_text();
                return true;
            }
            Key::Escape => {
                self.cancel_text();
                return true;
            }
            _ => {}
        }

        let DrawingState::TextInput(session) = &mut self.state else {
            return false;
        };
        match key {
            Key::Char(c) if !c.is_control() => session.buffer.push(c),
            Key::Space => session.buffer.push(' '),
            Key::Backspace => {
                session.buffer.pop();
            }
            _ => return false,
        }
        self.needs_redraw = true;
        true
    }
}
