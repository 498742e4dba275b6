use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;

use crate::delivery::{
    file::{self, FileSaveConfig},
    types::{Delivery, DeliveryError, DeliveryReceipt},
};

/// Destination for a finished screenshot and its notes.
///
/// Implementations may write files, post to a webhook, or talk to a relay; the
/// editor only sees success or a failure reason.
#[async_trait]
pub trait DeliverySink: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    async fn deliver(&self, delivery: Delivery) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Sink that writes `<name>.png` and `<name>.md` into a directory.
#[derive(Debug, Clone, Default)]
pub struct FileSink {
    config: FileSaveConfig,
}

impl FileSink {
    pub fn new(config: FileSaveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FileSaveConfig {
        &self.config
    }
}

#[async_trait]
impl DeliverySink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    async fn deliver(&self, delivery: Delivery) -> Result<DeliveryReceipt, DeliveryError> {
        let config = self.config.clone();
        task::spawn_blocking(move || file::save_delivery(&delivery, &config))
            .await
            .map_err(|e| DeliveryError::Task(format!("Save task failed: {}", e)))?
    }
}

/// Convenience constructor for the default file sink.
pub fn file_sink(config: FileSaveConfig) -> Arc<dyn DeliverySink> {
    Arc::new(FileSink::new(config))
}
