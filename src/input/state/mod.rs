mod actions;
mod core;
mod mouse;
mod render;
mod text;

pub use core::{DrawingState, FONT_SIZE_RANGE, InputState};
pub use mouse::{MIN_ARROW_LENGTH, MIN_RECT_SIZE};
pub use text::TextEditSession;
