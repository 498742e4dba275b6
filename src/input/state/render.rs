use crate::draw::{Annotation, Preview, Scene};
use crate::input::tool::Tool;

use super::{DrawingState, InputState};

impl InputState {
    /// Transient content for the gesture in progress.
    ///
    /// Drawing gestures preview the shape in the current style; an open text
    /// draft previews with the label's own size when editing.
    pub fn preview(&self) -> Option<Preview> {
        match &self.state {
            DrawingState::Drawing {
                tool,
                start_x,
                start_y,
                current_x,
                current_y,
            } => match tool {
                Tool::Rect => Some(Preview::Shape(Annotation::rect_from_drag(
                    (*start_x, *start_y),
                    (*current_x, *current_y),
                    self.current_color,
                    self.current_thickness,
                ))),
                Tool::Arrow => Some(Preview::Shape(Annotation::Arrow {
                    x1: *start_x,
                    y1: *start_y,
                    x2: *current_x,
                    y2: *current_y,
                    color: self.current_color,
                    stroke_width: self.current_thickness,
                })),
                Tool::Select | Tool::Text => None,
            },
            DrawingState::TextInput(session) => {
                let font_size = match session.target.and_then(|i| self.frame.get(i)) {
                    Some(Annotation::Text { font_size, .. }) => *font_size,
                    _ => self.current_font_size,
                };
                Some(Preview::TextDraft {
                    x: session.x,
                    y: session.y,
                    text: session.buffer.clone(),
                    color: self.current_color,
                    font_size,
                })
            }
            DrawingState::Idle | DrawingState::Dragging { .. } => None,
        }
    }

    /// Label hidden from the committed pass while its draft is on screen.
    pub fn hidden_index(&self) -> Option<usize> {
        self.text_session().and_then(|session| session.target)
    }

    /// Everything the renderer needs for the next redraw.
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            frame: &self.frame,
            hidden: self.hidden_index(),
            preview: self.preview(),
        }
    }
}
