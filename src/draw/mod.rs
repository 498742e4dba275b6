//! Annotation model, hit-testing, and Cairo rendering.
//!
//! This module defines the core drawing types used by the editor:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Annotation`]: the closed set of shape kinds (rectangle, arrow, text)
//! - [`Frame`]: ordered annotation list plus the current selection
//! - [`hit`]: geometric selection tests
//! - [`Renderer`]: background + shape layers, selection decoration, export

pub mod color;
pub mod font;
pub mod frame;
pub mod hit;
pub mod render;
pub mod shape;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::{FixedAdvanceMetrics, FontDescriptor, PangoTextMetrics, TextMetrics};
pub use frame::Frame;
pub use render::{Preview, Renderer, Scene, encode_png};
pub use shape::Annotation;
