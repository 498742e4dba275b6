//! Asynchronous two-stage background load: decode the source, then crop.

use tokio::task;

use super::raster::Raster;
use super::types::{CropRegion, LoadError};

/// A source image plus the optional crop applied before editing starts.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub bytes: Vec<u8>,
    pub crop: Option<CropRegion>,
}

impl LoadRequest {
    pub fn new(bytes: Vec<u8>, crop: Option<CropRegion>) -> Self {
        Self { bytes, crop }
    }
}

/// Decodes the source image and, when a crop is requested, derives the
/// cropped raster from it.
///
/// The crop stage only starts after the decode stage has completed. Both run
/// on the blocking pool so the caller's thread never stalls on pixel work.
pub async fn load_background(request: LoadRequest) -> Result<Raster, LoadError> {
    let LoadRequest { bytes, crop } = request;
    log::info!("Decoding background image ({} bytes)", bytes.len());

    let original = decode(bytes).await?;
    log::info!(
        "Decoded background: {}x{}",
        original.width(),
        original.height()
    );

    let Some(region) = crop else {
        return Ok(original);
    };

    log::debug!("Applying crop {:?}", region);
    let cropped = crop_raster(original, region).await?;
    log::info!(
        "Cropped background: {}x{}",
        cropped.width(),
        cropped.height()
    );
    Ok(cropped)
}

async fn decode(bytes: Vec<u8>) -> Result<Raster, LoadError> {
    task::spawn_blocking(move || Raster::decode_png(&bytes))
        .await
        .map_err(|e| LoadError::Task(format!("Decode task failed: {}", e)))?
}

async fn crop_raster(original: Raster, region: CropRegion) -> Result<Raster, LoadError> {
    task::spawn_blocking(move || original.crop(&region))
        .await
        .map_err(|e| LoadError::Task(format!("Crop task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: i32, height: i32) -> Vec<u8> {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        {
            let ctx = cairo::Context::new(&surface).unwrap();
            ctx.set_source_rgb(0.0, 1.0, 0.0);
            ctx.paint().unwrap();
        }
        let mut buffer = Vec::new();
        surface.write_to_png(&mut buffer).unwrap();
        buffer
    }

    #[tokio::test]
    async fn loads_without_crop() {
        let raster = load_background(LoadRequest::new(png_bytes(20, 10), None))
            .await
            .unwrap();
        assert_eq!((raster.width(), raster.height()), (20, 10));
    }

    #[tokio::test]
    async fn crop_stage_runs_after_decode() {
        let crop = CropRegion::new(2.0, 1.0, 4.0, 3.0, 2.0);
        let raster = load_background(LoadRequest::new(png_bytes(20, 10), Some(crop)))
            .await
            .unwrap();
        assert_eq!((raster.width(), raster.height()), (8, 6));
        assert_eq!(raster.pixel(0, 0), Some(0xFF00_FF00));
    }

    #[tokio::test]
    async fn decode_failure_is_reported() {
        let err = load_background(LoadRequest::new(vec![1, 2, 3], None))
            .await
            .unwrap_err();
        assert!(matches!(err, LoadError::Decode(_)));
    }
}
