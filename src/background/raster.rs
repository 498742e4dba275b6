//! Owned ARGB32 pixel buffer used as the editor background.

use std::fmt;
use std::io::Cursor;

use super::types::{CropRegion, LoadError, MAX_DIMENSION};

const BYTES_PER_PIXEL: usize = 4;

/// Decoded image in cairo's ARGB32 layout (premultiplied, native-endian).
///
/// Unlike a cairo surface this buffer is `Send`, so it can be produced on a
/// blocking task and handed back to the editing thread.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    stride: usize,
    data: Vec<u8>,
}

impl fmt::Debug for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl Raster {
    /// Wraps an existing ARGB32 buffer after validating its size.
    pub fn new(width: u32, height: u32, stride: usize, data: Vec<u8>) -> Result<Self, LoadError> {
        check_dimensions(width, height)?;
        if stride < width as usize * BYTES_PER_PIXEL || stride % BYTES_PER_PIXEL != 0 {
            return Err(LoadError::BadBuffer(format!(
                "stride {stride} too small for width {width}"
            )));
        }
        if data.len() < stride * height as usize {
            return Err(LoadError::BadBuffer(format!(
                "{} bytes for {}x{} with stride {}",
                data.len(),
                width,
                height,
                stride
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Fully transparent raster.
    pub fn blank(width: u32, height: u32) -> Result<Self, LoadError> {
        check_dimensions(width, height)?;
        let stride = width as usize * BYTES_PER_PIXEL;
        Ok(Self {
            width,
            height,
            stride,
            data: vec![0; stride * height as usize],
        })
    }

    /// Decodes PNG bytes.
    pub fn decode_png(bytes: &[u8]) -> Result<Self, LoadError> {
        let surface = cairo::ImageSurface::create_from_png(&mut Cursor::new(bytes))
            .map_err(|e| LoadError::Decode(e.to_string()))?;
        Self::from_surface(&surface)
    }

    /// Copies any cairo image surface into an ARGB32 raster.
    pub fn from_surface(source: &cairo::ImageSurface) -> Result<Self, LoadError> {
        let width = source.width();
        let height = source.height();
        if width <= 0 || height <= 0 {
            return Err(LoadError::Empty);
        }

        // Painting normalizes RGB24/A8/etc. into ARGB32.
        let mut target = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        {
            let ctx = cairo::Context::new(&target)?;
            ctx.set_source_surface(source, 0.0, 0.0)?;
            ctx.paint()?;
        }
        target.flush();

        let stride = target.stride() as usize;
        let data = target
            .data()
            .map_err(|e| LoadError::BadBuffer(e.to_string()))?
            .to_vec();

        Self::new(width as u32, height as u32, stride, data)
    }

    /// Creates a cairo surface holding a copy of the pixels.
    pub fn to_surface(&self) -> Result<cairo::ImageSurface, cairo::Error> {
        cairo::ImageSurface::create_for_data(
            self.data.clone(),
            cairo::Format::ARgb32,
            self.width as i32,
            self.height as i32,
            self.stride as i32,
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the ARGB32 pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = y as usize * self.stride + x as usize * BYTES_PER_PIXEL;
        let bytes: [u8; 4] = self.data[offset..offset + BYTES_PER_PIXEL].try_into().ok()?;
        Some(u32::from_ne_bytes(bytes))
    }

    /// Extracts the crop region into a same-size new raster.
    ///
    /// The source rectangle is `(x, y, w, h) * dpr`. Pixels of the region that
    /// fall outside this raster stay transparent.
    pub fn crop(&self, region: &CropRegion) -> Result<Raster, LoadError> {
        let (sx, sy, sw, sh) = region.source_rect()?;

        let mut out = Raster::blank(sw as u32, sh as u32)?;

        let src_w = self.width as i64;
        let src_h = self.height as i64;
        let col_start = (-sx).max(0);
        let col_end = sw.min(src_w - sx);
        if col_start >= col_end {
            return Ok(out);
        }
        let row_bytes = (col_end - col_start) as usize * BYTES_PER_PIXEL;

        for row in 0..sh {
            let src_y = sy + row;
            if src_y < 0 || src_y >= src_h {
                continue;
            }
            let src = src_y as usize * self.stride + (sx + col_start) as usize * BYTES_PER_PIXEL;
            let dst = row as usize * out.stride + col_start as usize * BYTES_PER_PIXEL;
            out.data[dst..dst + row_bytes].copy_from_slice(&self.data[src..src + row_bytes]);
        }

        Ok(out)
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), LoadError> {
    if width == 0 || height == 0 {
        return Err(LoadError::Empty);
    }
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(LoadError::TooLarge { width, height });
    }
    Ok(())
}
