use crate::config::Action;
use crate::input::{events::Key, tool::Tool};

use super::{DrawingState, InputState};

impl InputState {
    /// Processes a key press event.
    ///
    /// Handles modifier tracking, text entry while a draft is open, and the
    /// configurable keybindings otherwise.
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        // While typing, plain characters belong to the draft; only keys with
        // Ctrl/Alt held are looked up as shortcuts.
        if matches!(self.state, DrawingState::TextInput(_)) {
            if self.modifiers.command_held() {
                if let Some(action) = key.binding_name().and_then(|name| self.find_action(&name)) {
                    self.handle_action(action);
                    return;
                }
            }
            self.handle_text_key(key);
            return;
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };
        if let Some(action) = self.find_action(&key_str) {
            self.handle_action(action);
        }
    }

    /// Processes a key release event; only modifier state is tracked.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Handle an action triggered by a keybinding.
    pub(super) fn handle_action(&mut self, action: Action) {
        match action {
            Action::Cancel => self.cancel_gesture(),
            Action::SelectTool => {
                self.set_tool(Tool::Select);
            }
            Action::RectangleTool => {
                self.set_tool(Tool::Rect);
            }
            Action::ArrowTool => {
                self.set_tool(Tool::Arrow);
            }
            Action::TextTool => {
                self.set_tool(Tool::Text);
            }
            Action::Undo => {
                self.undo();
            }
            Action::ClearCanvas => {
                self.clear();
            }
            Action::DeleteSelected => {
                self.delete_selected();
            }
            Action::IncreaseThickness => {
                self.set_thickness((self.current_thickness + 1).min(20));
            }
            Action::DecreaseThickness => {
                self.set_thickness(self.current_thickness.saturating_sub(1));
            }
            Action::IncreaseFontSize => self.adjust_font_size(2.0),
            Action::DecreaseFontSize => self.adjust_font_size(-2.0),
        }
    }

    /// Abandons the gesture in progress without committing it.
    ///
    /// An idle Escape clears the selection instead.
    pub fn cancel_gesture(&mut self) {
        match &self.state {
            DrawingState::TextInput(_) => {
                self.cancel_text();
            }
            DrawingState::Drawing { tool, .. } => {
                log::debug!("{:?} gesture cancelled", tool);
                self.state = DrawingState::Idle;
                self.needs_redraw = true;
            }
            DrawingState::Dragging { .. } => {
                self.state = DrawingState::Idle;
                self.needs_redraw = true;
            }
            DrawingState::Idle => {
                if self.frame.selected().is_some() {
                    self.frame.set_selected(None);
                    self.needs_redraw = true;
                }
            }
        }
    }

    /// Switches the active tool, clearing the selection.
    ///
    /// Ignored mid-gesture (drawing or dragging). An open text draft loses
    /// focus and is committed first. Returns `true` if the tool changed hands.
    pub fn set_tool(&mut self, tool: Tool) -> bool {
        match self.state {
            DrawingState::Drawing { .. } | DrawingState::Dragging { .. } => {
                log::debug!("Ignoring tool switch to {:?} during a gesture", tool);
                return false;
            }
            DrawingState::TextInput(_) => {
                self.commit_text();
            }
            DrawingState::Idle => {}
        }

        log::debug!("Tool switched to {:?}", tool);
        self.tool = tool;
        self.frame.set_selected(None);
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
        true
    }

    /// Removes the most recently added annotation.
    pub fn undo(&mut self) -> bool {
        if self.frame.remove_last().is_none() {
            return false;
        }
        let removed = self.frame.len();
        self.on_shape_removed(removed);
        log::debug!("Undo removed annotation {}", removed);
        self.needs_redraw = true;
        true
    }

    /// Removes every annotation.
    pub fn clear(&mut self) -> bool {
        if self.frame.is_empty() {
            return false;
        }
        self.frame.clear();
        self.on_frame_cleared();
        log::debug!("Cleared all annotations");
        self.needs_redraw = true;
        true
    }

    /// Removes the selected annotation, if any.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.frame.selected() else {
            return false;
        };
        if self.frame.remove_at(index).is_none() {
            return false;
        }
        self.on_shape_removed(index);
        log::debug!("Deleted annotation {}", index);
        self.needs_redraw = true;
        true
    }
}
