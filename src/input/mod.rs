//! Input handling and the interaction state machine.
//!
//! This module turns pointer and keyboard events into annotation edits. It
//! tracks the active tool and style, and runs the gesture state machine for
//! drawing, dragging, and text entry.

pub mod events;
pub mod modifiers;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{InputEvent, Key};
pub use modifiers::Modifiers;
pub use state::{DrawingState, InputState, TextEditSession};
pub use tool::Tool;
