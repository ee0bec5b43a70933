//! Raster image type shared by the whole engine.
//!
//! The host application owns image decoding; the core only ever sees an
//! already-decoded RGB raster of known intrinsic dimensions. The same type is
//! used for the source image fed into the widget and for the cropped result
//! produced by extraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for raster construction and conversion.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The pixel buffer does not match `width * height * 3` bytes.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// The raster could not be converted to an `image::RgbImage`.
    #[error("Raster dimensions incompatible with pixel buffer")]
    InvalidDimensions,
}

/// An RGB raster with 3 bytes per pixel in row-major order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Raster {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length is width * height * 3.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new raster, validating the pixel buffer length.
    ///
    /// # Arguments
    /// * `width` - Raster width in pixels
    /// * `height` - Raster height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::BufferSizeMismatch`] when the buffer length
    /// does not equal `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a black raster of the given dimensions.
    pub fn black(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 3],
        }
    }

    /// Create a raster from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an `image::RgbImage` for encoding or further processing.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidDimensions`] if the buffer cannot back
    /// an image of this size.
    pub fn to_rgb_image(&self) -> Result<image::RgbImage, RasterError> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or(RasterError::InvalidDimensions)
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
