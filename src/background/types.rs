//! Data types for loading the background raster.

use std::str::FromStr;
use thiserror::Error;

/// Largest surface dimension cairo image surfaces accept.
pub const MAX_DIMENSION: u32 = 32767;

/// Largest crop offset, in raster pixels, in either direction.
pub const MAX_CROP_OFFSET: u32 = 4 * MAX_DIMENSION;

/// Crop rectangle in display coordinates, plus the device pixel ratio that
/// maps it onto the captured raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Ratio used for scaling; missing or nonsensical values fall back to 1.
    pub fn effective_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio
        } else {
            1.0
        }
    }

    /// The source rectangle in raster pixels: `(x, y, w, h) * dpr`, rounded.
    ///
    /// Fails for non-finite components, sizes that are not positive or exceed
    /// [`MAX_DIMENSION`], and offsets beyond [`MAX_CROP_OFFSET`].
    pub fn source_rect(&self) -> Result<(i64, i64, i64, i64), LoadError> {
        let dpr = self.effective_ratio();
        let [x, y, w, h] = [self.x, self.y, self.width, self.height].map(|v| (v * dpr).round());

        if ![x, y, w, h].iter().all(|v| v.is_finite()) {
            return Err(LoadError::InvalidCrop(format!(
                "non-finite region {},{},{},{}",
                self.x, self.y, self.width, self.height
            )));
        }
        if w <= 0.0 || h <= 0.0 {
            return Err(LoadError::InvalidCrop(format!("{}x{} source rectangle", w, h)));
        }
        if w > MAX_DIMENSION as f64 || h > MAX_DIMENSION as f64 {
            return Err(LoadError::InvalidCrop(format!(
                "{}x{} exceeds {} pixels",
                w, h, MAX_DIMENSION
            )));
        }
        if x.abs() > MAX_CROP_OFFSET as f64 || y.abs() > MAX_CROP_OFFSET as f64 {
            return Err(LoadError::InvalidCrop(format!(
                "offset {},{} is out of range",
                x, y
            )));
        }

        Ok((x as i64, y as i64, w as i64, h as i64))
    }
}

impl FromStr for CropRegion {
    type Err = String;

    /// Parses `x,y,width,height` with an optional trailing `,dpr`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<f64> = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid number '{}' in crop '{}'", part.trim(), s))
            })
            .collect::<Result<_, _>>()?;

        if let Some(bad) = parts.iter().find(|v| !v.is_finite()) {
            return Err(format!("Crop values must be finite, got {}", bad));
        }

        match parts.as_slice() {
            [x, y, w, h] => Ok(Self::new(*x, *y, *w, *h, 1.0)),
            [x, y, w, h, dpr] => Ok(Self::new(*x, *y, *w, *h, *dpr)),
            _ => Err(format!(
                "Expected x,y,width,height[,dpr] but got {} values",
                parts.len()
            )),
        }
    }
}

/// Errors that can occur while preparing the background raster.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Image has no pixels")]
    Empty,

    #[error("Image is too large: {width}x{height}")]
    TooLarge { width: u32, height: u32 },

    #[error("Invalid crop region: {0}")]
    InvalidCrop(String),

    #[error("Pixel buffer does not match its dimensions: {0}")]
    BadBuffer(String),

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Image loading task failed: {0}")]
    Task(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_crop_with_and_without_ratio() {
        let plain: CropRegion = "10,20,30,40".parse().unwrap();
        assert_eq!(plain, CropRegion::new(10.0, 20.0, 30.0, 40.0, 1.0));

        let scaled: CropRegion = "1, 2, 3, 4, 2".parse().unwrap();
        assert_eq!(scaled.source_rect().unwrap(), (2, 4, 6, 8));
    }

    #[test]
    fn rejects_malformed_crop() {
        assert!("1,2,3".parse::<CropRegion>().is_err());
        assert!("a,b,c,d".parse::<CropRegion>().is_err());
        assert!("inf,0,2,2".parse::<CropRegion>().is_err());
        assert!("0,0,NaN,2".parse::<CropRegion>().is_err());
    }

    #[test]
    fn non_positive_ratio_falls_back_to_one() {
        let region = CropRegion::new(5.0, 5.0, 10.0, 10.0, 0.0);
        assert_eq!(region.effective_ratio(), 1.0);
        assert_eq!(region.source_rect().unwrap(), (5, 5, 10, 10));
    }

    #[test]
    fn huge_offsets_are_rejected() {
        for region in [
            CropRegion::new(-1e300, 0.0, 2.0, 2.0, 1.0),
            CropRegion::new(0.0, 1e300, 2.0, 2.0, 1.0),
            CropRegion::new(f64::INFINITY, 0.0, 2.0, 2.0, 1.0),
            CropRegion::new(0.0, 0.0, 2.0, f64::NAN, 1.0),
        ] {
            assert!(matches!(
                region.source_rect(),
                Err(LoadError::InvalidCrop(_))
            ));
        }
    }
}
