//! Delivery of finished screenshots.
//!
//! The editor produces a [`Delivery`] (flattened PNG plus notes); a
//! [`DeliverySink`] takes it from there. The bundled [`FileSink`] writes the
//! image and a markdown notes report to disk.

pub mod dependencies;
pub mod file;
pub mod pipeline;
pub mod report;
pub mod types;


pub use dependencies::{DeliverySink, FileSink, file_sink};
pub use file::FileSaveConfig;
pub use pipeline::perform_delivery;
pub use types::{Delivery, DeliveryError, DeliveryOutcome, DeliveryReceipt, PageContext};
