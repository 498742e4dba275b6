//! Background raster preparation: decoding, cropping, and the async loader.

pub mod loader;
pub mod raster;
pub mod types;

pub use loader::{LoadRequest, load_background};
pub use raster::Raster;
pub use types::{CropRegion, LoadError};
