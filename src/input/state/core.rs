//! Interaction state machine and input state management.

use std::collections::HashMap;
use std::rc::Rc;

use crate::config::{Action, KeyBinding};
use crate::draw::{Color, Frame, TextMetrics};
use crate::input::{modifiers::Modifiers, tool::Tool};

use super::text::TextEditSession;

/// Smallest and largest font size accepted for text labels.
pub const FONT_SIZE_RANGE: (f64, f64) = (8.0, 72.0);

/// Current gesture state.
///
/// Every gesture starts on pointer-down and resolves back to `Idle` on
/// pointer-up, text commit, or cancel.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// No gesture in progress
    Idle,
    /// Dragging out a new rectangle or arrow
    Drawing {
        /// Tool that started the gesture
        tool: Tool,
        /// Press point
        start_x: f64,
        start_y: f64,
        /// Latest pointer position, used for the live preview
        current_x: f64,
        current_y: f64,
    },
    /// Moving an existing annotation
    Dragging {
        /// Index of the annotation being moved
        index: usize,
        /// Pointer position minus the annotation's anchor
        offset_x: f64,
        offset_y: f64,
    },
    /// Typing a new label or editing an existing one
    TextInput(TextEditSession),
}

/// Main input state for an editing session.
///
/// Owns the annotation list and the gesture state machine. All document
/// mutations go through its methods so the selection and any in-flight
/// gesture always agree with the list. Coordinates passed in are already in
/// canvas-native pixel space.
pub struct InputState {
    /// Annotations and selection
    pub(super) frame: Frame,
    /// Active tool
    pub(super) tool: Tool,
    /// Color for new shapes and edited labels
    pub current_color: Color,
    /// Stroke width for new rectangles and arrows
    pub current_thickness: u32,
    /// Font size for new text labels
    pub current_font_size: f64,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Current gesture state
    pub state: DrawingState,
    /// Whether the shape layer needs repainting
    pub needs_redraw: bool,
    /// Text measurement shared with the renderer
    pub(super) metrics: Rc<dyn TextMetrics>,
    /// Keybinding action map for lookup
    action_map: HashMap<KeyBinding, Action>,
}

impl InputState {
    /// Creates an idle input state with the select tool active.
    pub fn new(
        color: Color,
        thickness: u32,
        font_size: f64,
        metrics: Rc<dyn TextMetrics>,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            frame: Frame::new(),
            tool: Tool::default(),
            current_color: color,
            current_thickness: thickness.max(1),
            current_font_size: clamp_font_size(font_size),
            modifiers: Modifiers::new(),
            state: DrawingState::Idle,
            needs_redraw: true,
            metrics,
            action_map,
        }
    }

    /// Read-only view of the annotation list and selection.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn metrics(&self) -> &dyn TextMetrics {
        self.metrics.as_ref()
    }

    /// Look up an action for the given key name and the held modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    /// Sets the color used for new shapes and label edits.
    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.needs_redraw = true;
    }

    /// Sets the stroke width for new shapes. Zero is coerced to 1.
    pub fn set_thickness(&mut self, thickness: u32) {
        if thickness == 0 {
            log::debug!("Stroke width 0 coerced to 1");
        }
        self.current_thickness = thickness.max(1);
        self.needs_redraw = true;
    }

    /// Sets the font size for new labels, clamped to 8-72px.
    pub fn set_font_size(&mut self, size: f64) {
        if !size.is_finite() {
            log::warn!("Ignoring non-finite font size");
            return;
        }
        self.current_font_size = clamp_font_size(size);
        self.needs_redraw = true;
    }

    /// Adjusts the current font size by a delta, clamping to the valid range.
    pub fn adjust_font_size(&mut self, delta: f64) {
        self.set_font_size(self.current_font_size + delta);
        log::debug!("Font size adjusted to {:.1}px", self.current_font_size);
    }

    /// Keeps gesture indices valid after the annotation at `removed` is gone.
    ///
    /// A gesture whose own target was removed ends; targets above the removed
    /// slot shift down by one.
    pub(super) fn on_shape_removed(&mut self, removed: usize) {
        let ends_gesture = match &mut self.state {
            DrawingState::Dragging { index, .. } => shift_target(index, removed),
            DrawingState::TextInput(session) => match session.target.as_mut() {
                Some(target) => shift_target(target, removed),
                None => false,
            },
            _ => false,
        };

        if ends_gesture {
            log::debug!("Gesture target {} removed; returning to idle", removed);
            self.state = DrawingState::Idle;
        }
    }

    /// Ends any gesture that refers to an existing annotation.
    pub(super) fn on_frame_cleared(&mut self) {
        let refers_to_shape = match &self.state {
            DrawingState::Dragging { .. } => true,
            DrawingState::TextInput(session) => session.target.is_some(),
            _ => false,
        };
        if refers_to_shape {
            self.state = DrawingState::Idle;
        }
    }
}

/// Returns `true` when `target` was the removed index, else shifts it down if needed.
fn shift_target(target: &mut usize, removed: usize) -> bool {
    if *target == removed {
        return true;
    }
    if *target > removed {
        *target -= 1;
    }
    false
}

fn clamp_font_size(size: f64) -> f64 {
    size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1)
}
