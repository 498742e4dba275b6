use std::sync::Arc;

use crate::delivery::{
    dependencies::DeliverySink,
    types::{Delivery, DeliveryOutcome},
};

/// Hands a finished screenshot to `sink` and reports the outcome.
///
/// Failures are logged and turned into [`DeliveryOutcome::Failed`] so the host
/// can show the reason and let the user retry.
pub async fn perform_delivery(delivery: Delivery, sink: Arc<dyn DeliverySink>) -> DeliveryOutcome {
    log::info!(
        "Delivering {}x{} screenshot ({} bytes) via {} sink",
        delivery.width,
        delivery.height,
        delivery.png.len(),
        sink.name()
    );

    match sink.deliver(delivery).await {
        Ok(receipt) => {
            log::info!("Delivery succeeded");
            if let Some(path) = &receipt.image_path {
                log::debug!("Image written to {}", path.display());
            }
            DeliveryOutcome::Delivered(receipt)
        }
        Err(err) => {
            log::error!("Delivery via {} failed: {}", sink.name(), err);
            DeliveryOutcome::Failed(err.to_string())
        }
    }
}
