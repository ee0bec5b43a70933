//! WASM-compatible wrapper types for raster data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Squarecrop types, handling the conversion between Rust and JavaScript
//! data representations.

use squarecrop_core::Raster;
use wasm_bindgen::prelude::*;

/// A raster image wrapper for JavaScript.
///
/// Wraps the core `Raster` type and provides a JavaScript-friendly interface
/// for accessing image dimensions and pixel data.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. For performance-critical
/// code, keep the raster in WASM memory and only extract pixels when needed.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a new JsRaster from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Raster width in pixels
    /// * `height` - Raster height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRaster {
        JsRaster {
            width,
            height,
            pixels,
        }
    }

    /// Get the raster width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRaster {
    /// Create a JsRaster from a core Raster.
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }

    /// Convert to a core Raster. Clones the pixel data.
    pub(crate) fn to_raster(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}
