//! WASM bindings for the interactive cropping widget.
//!
//! Wraps [`CropView`] in a `#[wasm_bindgen]` class. The JavaScript host
//! forwards pointer/touch events and a `requestAnimationFrame` clock, reads
//! the transform for canvas drawing, and calls `extract_crop` when the user
//! confirms.

use serde::Serialize;
use squarecrop_core::{Affine, CropRect, CropView, Pinch, PinchDetector, PointerEvent};
use std::time::Duration;
use wasm_bindgen::prelude::*;

use crate::types::JsRaster;

/// Snapshot of the widget's display state for host-side inspection.
#[derive(Serialize)]
struct WidgetState {
    transform: Affine,
    crop: CropRect,
    rotation_degrees: i32,
    current_scale: f64,
}

/// The interactive cropping widget.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const widget = new CropWidget();
/// widget.resize(canvas.width, canvas.height);
/// widget.set_image(raster);
///
/// canvas.onpointermove = (e) => widget.pointer_move(e.offsetX, e.offsetY);
/// const frame = (dt: number) => {
///   widget.tick(dt);
///   if (widget.take_redraw()) draw(widget.transform());
///   requestAnimationFrame(frame);
/// };
/// ```
#[wasm_bindgen]
pub struct CropWidget {
    view: CropView,
    pinch: PinchDetector,
}

impl Default for CropWidget {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl CropWidget {
    /// Create an empty widget with no image or viewport.
    #[wasm_bindgen(constructor)]
    pub fn new() -> CropWidget {
        CropWidget {
            view: CropView::new(),
            pinch: PinchDetector::new(),
        }
    }

    /// Install a decoded image.
    pub fn set_image(&mut self, image: &JsRaster) {
        self.view.set_image(image.to_raster());
    }

    /// Notify the widget of a viewport resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.view.viewport_resized(width, height);
    }

    /// First pointer down at viewport coordinates.
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.view.handle_pointer(PointerEvent::Down { x, y });
    }

    /// Additional pointer down while one is already held.
    pub fn second_pointer_down(&mut self, x: f64, y: f64) {
        self.view.handle_pointer(PointerEvent::SecondDown { x, y });
    }

    /// Primary pointer moved.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.view.handle_pointer(PointerEvent::Move { x, y });
    }

    /// All pointers released.
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.pinch.end();
        self.view.handle_pointer(PointerEvent::Up { x, y });
    }

    /// Feed the current positions of two touch points.
    ///
    /// Derives an incremental pinch update from the change in finger span
    /// and applies it. Call once per touchmove while two fingers are down.
    pub fn pinch_update(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        if let Some(pinch) = self.pinch.update((x0, y0), (x1, y1)) {
            self.view.handle_pinch(pinch);
        }
    }

    /// Apply a pre-computed pinch factor about a focus point.
    ///
    /// For hosts with their own scale-gesture detector (trackpad wheel
    /// zoom, PointerEvent-based detectors).
    pub fn pinch(&mut self, factor: f64, focus_x: f64, focus_y: f64) {
        self.view.handle_pinch(Pinch {
            factor,
            focus_x,
            focus_y,
        });
    }

    /// Trigger a 90-degree rotation (also fired by tapping the hotspot).
    pub fn rotate(&mut self) {
        self.view.rotate();
    }

    /// Advance animations by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        self.view.tick(Duration::from_secs_f64(dt_ms.max(0.0) / 1000.0));
    }

    /// Whether the view changed since the last call, clearing the flag.
    pub fn take_redraw(&mut self) -> bool {
        self.view.take_redraw()
    }

    /// The current transform as `[sx, kx, tx, ky, sy, ty]`, matching the
    /// first two rows of a canvas `setTransform` matrix.
    pub fn transform(&self) -> Vec<f64> {
        let m = self.view.transform();
        vec![m.sx, m.kx, m.tx, m.ky, m.sy, m.ty]
    }

    /// Crop square as `[left, top, size]` in viewport pixels.
    pub fn crop_rect(&self) -> Vec<u32> {
        let crop = self.view.crop_rect();
        vec![crop.left, crop.top, crop.size]
    }

    /// Rotate hotspot as `[cx, cy, radius]` in viewport pixels, for drawing
    /// the rotate button.
    pub fn rotate_hotspot(&self) -> Vec<f64> {
        let hotspot = self.view.rotate_hotspot();
        vec![hotspot.cx, hotspot.cy, hotspot.radius]
    }

    /// Current resting rotation in degrees (0, 90, 180, or 270).
    pub fn rotation_degrees(&self) -> i32 {
        self.view.rotation_degrees()
    }

    /// Current uniform scale factor.
    pub fn current_scale(&self) -> f64 {
        self.view.current_scale()
    }

    /// Extract the crop square, or `undefined` when no image is loaded.
    pub fn extract_crop(&self) -> Option<JsRaster> {
        self.view.extract_crop().map(JsRaster::from_raster)
    }

    /// Extract the crop square directly as a `Uint8Array` of RGB bytes,
    /// ready to be expanded into canvas `ImageData`.
    pub fn extract_crop_bytes(&self) -> Option<js_sys::Uint8Array> {
        self.view
            .extract_crop()
            .map(|raster| js_sys::Uint8Array::from(raster.pixels.as_slice()))
    }

    /// Current display state as a plain JS object:
    /// `{ transform, crop, rotation_degrees, current_scale }`.
    pub fn state(&self) -> JsValue {
        let state = WidgetState {
            transform: *self.view.transform(),
            crop: self.view.crop_rect(),
            rotation_degrees: self.view.rotation_degrees(),
            current_scale: self.view.current_scale(),
        };
        serde_wasm_bindgen::to_value(&state).unwrap_or(JsValue::NULL)
    }
}

impl CropWidget {
    /// Direct access to the core view for Rust-side callers.
    pub fn view(&self) -> &CropView {
        &self.view
    }
}
