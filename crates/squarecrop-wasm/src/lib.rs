//! Squarecrop WASM - WebAssembly bindings for the cropping widget
//!
//! This crate exposes the squarecrop-core engine to JavaScript/TypeScript
//! applications. The host owns the canvas, the image decode pipeline, and the
//! animation-frame loop; the widget owns every piece of interactive state.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for raster data
//! - `widget` - The `CropWidget` class wrapping the core view
//!
//! # Usage
//!
//! ```typescript
//! import init, { CropWidget, JsRaster } from '@squarecrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const widget = new CropWidget();
//! widget.resize(canvas.width, canvas.height);
//! widget.set_image(new JsRaster(width, height, rgbPixels));
//! ```

use wasm_bindgen::prelude::*;

mod types;
mod widget;

// Re-export public types
pub use types::JsRaster;
pub use widget::CropWidget;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
    web_sys::console::debug_1(&format!("squarecrop-wasm {}", version()).into());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
