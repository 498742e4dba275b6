use crate::draw::{Annotation, hit};
use crate::input::tool::Tool;

use super::{DrawingState, InputState};

/// Rectangles must exceed this size on both axes to be kept.
pub const MIN_RECT_SIZE: f64 = 5.0;

/// Arrows must be longer than this to be kept.
pub const MIN_ARROW_LENGTH: f64 = 10.0;

impl InputState {
    /// Processes a pointer press at canvas coordinates (x, y).
    ///
    /// An open text draft loses focus and is committed first.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        if matches!(self.state, DrawingState::TextInput(_)) {
            self.commit_text();
        }

        match self.tool {
            Tool::Select => {
                let hit = hit::topmost_hit(self.frame.shapes(), x, y, self.metrics.as_ref());
                match hit.and_then(|index| self.frame.get(index).map(|s| (index, s.anchor()))) {
                    Some((index, (ax, ay))) => {
                        self.frame.set_selected(Some(index));
                        self.state = DrawingState::Dragging {
                            index,
                            offset_x: x - ax,
                            offset_y: y - ay,
                        };
                        log::debug!("Selected annotation {}", index);
                    }
                    None => {
                        self.frame.set_selected(None);
                        self.state = DrawingState::Idle;
                    }
                }
            }
            Tool::Text => {
                self.frame.set_selected(None);
                self.begin_text_edit(x, y, None, String::new());
            }
            tool @ (Tool::Rect | Tool::Arrow) => {
                self.frame.set_selected(None);
                self.state = DrawingState::Drawing {
                    tool,
                    start_x: x,
                    start_y: y,
                    current_x: x,
                    current_y: y,
                };
            }
        }

        self.needs_redraw = true;
    }

    /// Processes pointer motion.
    ///
    /// While dragging, the target follows the pointer; while drawing, only the
    /// preview position changes.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        match &mut self.state {
            DrawingState::Dragging {
                index,
                offset_x,
                offset_y,
            } => {
                let Some(shape) = self.frame.get_mut(*index) else {
                    return;
                };
                let (ax, ay) = shape.anchor();
                shape.translate(x - *offset_x - ax, y - *offset_y - ay);
                if matches!(shape, Annotation::Arrow { .. }) {
                    let (nx, ny) = shape.anchor();
                    *offset_x = x - nx;
                    *offset_y = y - ny;
                }
                self.needs_redraw = true;
            }
            DrawingState::Drawing {
                current_x,
                current_y,
                ..
            } => {
                *current_x = x;
                *current_y = y;
                self.needs_redraw = true;
            }
            DrawingState::Idle | DrawingState::TextInput(_) => {}
        }
    }

    /// Processes a pointer release.
    ///
    /// Returns `true` when a new annotation was committed. Degenerate shapes are
    /// discarded silently.
    pub fn on_pointer_up(&mut self, x: f64, y: f64) -> bool {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing {
                tool,
                start_x,
                start_y,
                ..
            } => {
                self.needs_redraw = true;
                self.commit_drawn_shape(tool, (start_x, start_y), (x, y))
            }
            DrawingState::Dragging { index, .. } => {
                log::debug!("Finished dragging annotation {}", index);
                self.needs_redraw = true;
                false
            }
            other => {
                // A text draft outlives the click that opened it
                self.state = other;
                false
            }
        }
    }

    /// Processes a double-click; with the select tool this opens the topmost
    /// text label under the pointer for editing.
    pub fn on_double_click(&mut self, x: f64, y: f64) -> bool {
        if self.tool != Tool::Select {
            return false;
        }
        if matches!(self.state, DrawingState::TextInput(_)) {
            self.commit_text();
        }

        let hit = hit::topmost_hit_where(self.frame.shapes(), x, y, self.metrics.as_ref(), |s| {
            matches!(s, Annotation::Text { .. })
        });
        let Some(index) = hit else {
            return false;
        };
        let Some(Annotation::Text {
            x: tx, y: ty, text, ..
        }) = self.frame.get(index)
        else {
            return false;
        };

        let (tx, ty, text) = (*tx, *ty, text.clone());
        self.frame.set_selected(Some(index));
        self.begin_text_edit(tx, ty, Some(index), text);
        true
    }

    fn commit_drawn_shape(&mut self, tool: Tool, start: (f64, f64), end: (f64, f64)) -> bool {
        let (dx, dy) = (end.0 - start.0, end.1 - start.1);

        let shape = match tool {
            Tool::Rect if dx.abs() > MIN_RECT_SIZE && dy.abs() > MIN_RECT_SIZE => {
                Annotation::rect_from_drag(start, end, self.current_color, self.current_thickness)
            }
            Tool::Arrow if dx.hypot(dy) > MIN_ARROW_LENGTH => Annotation::Arrow {
                x1: start.0,
                y1: start.1,
                x2: end.0,
                y2: end.1,
                color: self.current_color,
                stroke_width: self.current_thickness,
            },
            _ => {
                log::debug!("Discarding degenerate {:?} gesture ({:.1}, {:.1})", tool, dx, dy);
                return false;
            }
        };

        log::debug!("Committed {}", shape.kind());
        self.frame.append(shape);
        true
    }
}
