//! Data types for handing a finished annotation off to a delivery sink.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Where the screenshot came from, used for the notes report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Page or window title.
    pub title: Option<String>,
    /// Page address.
    pub url: Option<String>,
}

/// A flattened screenshot plus the notes the user typed alongside it.
#[derive(Clone)]
pub struct Delivery {
    /// PNG-encoded background with all committed annotations.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Free-text notes, as entered.
    pub notes: String,
    pub context: PageContext,
    /// When the delivery was finalized.
    pub created_at: DateTime<Local>,
}

impl Delivery {
    pub fn new(png: Vec<u8>, width: u32, height: u32, notes: impl Into<String>) -> Self {
        Self {
            png,
            width,
            height,
            notes: notes.into(),
            context: PageContext::default(),
            created_at: Local::now(),
        }
    }

    pub fn with_context(mut self, context: PageContext) -> Self {
        self.context = context;
        self
    }
}

impl fmt::Debug for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delivery")
            .field("png_bytes", &self.png.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("notes_len", &self.notes.len())
            .field("context", &self.context)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// What a sink reports back after accepting a delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryReceipt {
    /// Where the image ended up, for sinks that write files.
    pub image_path: Option<PathBuf>,
    /// Where the notes report ended up, for sinks that write files.
    pub notes_path: Option<PathBuf>,
}

/// Outcome of a delivery request, as reported to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered(DeliveryReceipt),
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered(_))
    }
}

/// Errors that can occur while delivering a finished screenshot.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to deliver: image is empty")]
    EmptyImage,

    #[error("Invalid filename template '{0}'")]
    InvalidTemplate(String),

    #[error("Delivery rejected: {0}")]
    Rejected(String),

    #[error("Delivery task failed: {0}")]
    Task(String),
}
