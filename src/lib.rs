//! shotmark: mark up a captured screenshot and hand it off with notes.
//!
//! The crate is split along the lifetime of one editing session:
//! - [`background`]: decode and crop the captured image off the editing thread
//! - [`viewport`]: fit the image into the display area and map coordinates
//! - [`input`]: tools, gestures, text entry, and keyboard shortcuts
//! - [`draw`]: the annotation model, hit-testing, and Cairo rendering
//! - [`editor`]: ties the above together for a host
//! - [`delivery`]: flatten, encode, and hand the result to a sink
//! - [`config`]: user settings shared by the binary and embedding hosts

pub mod background;
pub mod config;
pub mod delivery;
pub mod draw;
pub mod editor;
pub mod input;
pub mod util;
pub mod viewport;

pub use config::Config;
pub use editor::{Editor, EditorError, EditorSettings, LoadState};
pub use input::{InputEvent, Tool};
