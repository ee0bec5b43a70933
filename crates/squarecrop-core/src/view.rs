//! The cropping widget's state machine.
//!
//! [`CropView`] owns the transform and everything that may mutate it: the
//! gesture state machine, the boundary-resistance drag path, and the settle
//! and rotate animations. Everything runs on one logical thread; the host
//! forwards pointer/pinch events, calls [`CropView::tick`] once per frame,
//! and redraws whenever [`CropView::take_redraw`] reports a change.
//!
//! Mutual exclusion is structural rather than locked: a new drag cancels the
//! settle session, a pointer-down commits a running rotation, and a rotate
//! trigger while one is in flight is ignored.

use std::time::Duration;

use crate::affine::{Affine, Rect};
use crate::animation::{RotateAnimation, Settle};
use crate::extract;
use crate::gesture::{GestureMode, Pinch, PointerEvent, RotateHotspot};
use crate::raster::Raster;
use crate::resistance::resist;
use crate::viewport::{
    compute_crop_rect, fit_cover_transform, min_cover_scale, CropRect, MAX_SCALE,
};

/// Interactive state for one cropping session.
#[derive(Debug, Clone)]
pub struct CropView {
    image: Option<Raster>,
    view_width: u32,
    view_height: u32,
    crop: CropRect,
    hotspot: RotateHotspot,

    transform: Affine,
    /// Transform snapshot taken at gesture start.
    saved: Affine,
    mode: GestureMode,
    start: (f64, f64),

    current_scale: f64,
    min_scale: f64,
    rotation_degrees: i32,

    settle: Option<Settle>,
    rotate: Option<RotateAnimation>,

    needs_redraw: bool,
}

impl Default for CropView {
    fn default() -> Self {
        Self::new()
    }
}

impl CropView {
    /// Create an empty view: no image, no viewport.
    pub fn new() -> Self {
        Self {
            image: None,
            view_width: 0,
            view_height: 0,
            crop: CropRect::default(),
            hotspot: RotateHotspot::for_viewport(0, 0),
            transform: Affine::identity(),
            saved: Affine::identity(),
            mode: GestureMode::None,
            start: (0.0, 0.0),
            current_scale: 1.0,
            min_scale: 1.0,
            rotation_degrees: 0,
            settle: None,
            rotate: None,
            needs_redraw: false,
        }
    }

    /// Install a decoded image and center it over the crop square.
    ///
    /// Any running animations are wound down first (a rotation commits its
    /// target). The current rotation is kept; the new image is laid out for
    /// it.
    pub fn set_image(&mut self, image: Raster) {
        self.settle = None;
        self.commit_rotation();
        self.image = Some(image);
        self.reset_to_fit_cover();
    }

    /// Handle a viewport resize, recomputing crop geometry and re-centering.
    pub fn viewport_resized(&mut self, width: u32, height: u32) {
        self.view_width = width;
        self.view_height = height;
        self.crop = compute_crop_rect(width, height);
        self.hotspot = RotateHotspot::for_viewport(width, height);
        self.reset_to_fit_cover();
    }

    /// Process one pointer event.
    ///
    /// Events landing on the rotate hotspot are consumed before gesture
    /// dispatch; a release inside the circle triggers rotation. Without an
    /// image or viewport every event is a no-op.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let (x, y) = event.position();

        if self.view_width > 0 && self.hotspot.contains(x, y) {
            if matches!(event, PointerEvent::Up { .. }) {
                self.rotate();
            }
            return;
        }

        if !self.is_ready() {
            return;
        }

        match event {
            PointerEvent::Down { x, y } => {
                // The gesture takes over from any running animation.
                self.settle = None;
                self.commit_rotation();
                self.saved = self.transform;
                self.start = (x, y);
                self.mode = GestureMode::Drag;
            }
            PointerEvent::SecondDown { .. } => {
                self.saved = self.transform;
                self.mode = GestureMode::Zoom;
            }
            PointerEvent::Move { x, y } => {
                if self.mode == GestureMode::Drag {
                    let (image_w, image_h) = self.image_dims();
                    let (dx, dy) = (x - self.start.0, y - self.start.1);
                    let (rx, ry) = resist(dx, dy, &self.saved, image_w, image_h, self.crop);

                    self.transform = self.saved;
                    self.transform.post_translate(rx, ry);
                    self.needs_redraw = true;
                }
            }
            PointerEvent::Up { .. } => {
                if self.mode != GestureMode::None {
                    self.start_settle();
                }
                self.mode = GestureMode::None;
            }
        }
    }

    /// Apply one pinch update while in zoom mode.
    ///
    /// The scale is hard-capped at [`MAX_SCALE`]; an update that would exceed
    /// it is silently ignored. There is no floor mid-gesture: under-zoom is
    /// corrected by the re-center animation on release.
    pub fn handle_pinch(&mut self, pinch: Pinch) {
        if !self.is_ready() || self.mode != GestureMode::Zoom {
            return;
        }

        let new_scale = self.current_scale * pinch.factor;
        if new_scale <= MAX_SCALE {
            self.transform
                .post_scale(pinch.factor, pinch.focus_x, pinch.focus_y);
            self.current_scale = new_scale;
            self.needs_redraw = true;
        }
    }

    /// Trigger a 90-degree rotation.
    ///
    /// Ignored when no image is loaded or a rotation is already running.
    pub fn rotate(&mut self) {
        if !self.is_ready() || self.rotate.is_some() {
            return;
        }
        self.rotate = Some(RotateAnimation::new(self.rotation_degrees));
    }

    /// Advance all running animations by `dt`.
    ///
    /// Each frame mutates the transform synchronously and raises the redraw
    /// flag; when the rotate tween completes, the target angle is committed
    /// and the minimum scale recomputed for the new orientation.
    pub fn tick(&mut self, dt: Duration) {
        if !self.is_ready() {
            return;
        }
        let (image_w, image_h) = self.image_dims();

        if let Some(settle) = &mut self.settle {
            self.transform = settle.advance(dt, &self.transform);
            self.needs_redraw = true;
            if settle.is_finished() {
                self.settle = None;
            }
        }

        if let Some(rotate) = &mut self.rotate {
            let angle = rotate.advance(dt);
            self.transform = fit_cover_transform(image_w, image_h, angle, self.crop);
            self.current_scale = min_cover_scale(image_w, image_h, angle, self.crop.size);
            self.needs_redraw = true;

            if rotate.is_finished() {
                self.commit_rotation();
            }
        }
    }

    /// Extract the crop square under the current transform.
    ///
    /// Returns `None` while no image is loaded or the viewport is not
    /// established; the presentation layer treats that as "nothing to show".
    pub fn extract_crop(&self) -> Option<Raster> {
        let image = self.image.as_ref()?;
        extract::extract_crop(
            image,
            &self.transform,
            self.view_width,
            self.view_height,
            self.crop,
        )
    }

    /// Whether the view needs redrawing, clearing the flag.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn transform(&self) -> &Affine {
        &self.transform
    }

    pub fn crop_rect(&self) -> CropRect {
        self.crop
    }

    pub fn rotate_hotspot(&self) -> RotateHotspot {
        self.hotspot
    }

    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    pub fn current_scale(&self) -> f64 {
        self.current_scale
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn gesture_mode(&self) -> GestureMode {
        self.mode
    }

    pub fn image(&self) -> Option<&Raster> {
        self.image.as_ref()
    }

    pub fn viewport_size(&self) -> (u32, u32) {
        (self.view_width, self.view_height)
    }

    /// True once both an image and a non-degenerate viewport exist.
    fn is_ready(&self) -> bool {
        self.image.is_some() && self.crop.size > 0
    }

    fn image_dims(&self) -> (f64, f64) {
        match &self.image {
            Some(img) => (img.width as f64, img.height as f64),
            None => (0.0, 0.0),
        }
    }

    /// Rebuild the transform as the canonical fit-cover state for the
    /// current rotation.
    fn reset_to_fit_cover(&mut self) {
        if !self.is_ready() {
            return;
        }

        let (image_w, image_h) = self.image_dims();
        self.min_scale =
            min_cover_scale(image_w, image_h, self.rotation_degrees as f64, self.crop.size);
        if self.current_scale < self.min_scale {
            self.current_scale = self.min_scale;
        }

        self.transform = fit_cover_transform(
            image_w,
            image_h,
            self.rotation_degrees as f64,
            self.crop,
        );
        self.needs_redraw = true;
    }

    /// Wind down a running rotation, committing its target angle.
    ///
    /// Cancellation is completion for rotation bookkeeping: the visual state
    /// already matches the target orientation closely enough that reverting
    /// would be jarring.
    fn commit_rotation(&mut self) {
        if let Some(rotate) = self.rotate.take() {
            self.rotation_degrees = rotate.target_degrees();
            let (image_w, image_h) = self.image_dims();
            self.min_scale = min_cover_scale(
                image_w,
                image_h,
                self.rotation_degrees as f64,
                self.crop.size,
            );
        }
    }

    /// Evaluate the release animation.
    ///
    /// Under-zoomed transforms re-center entirely; otherwise only boundary
    /// overflow is corrected, and no animation starts when the crop square is
    /// already covered.
    fn start_settle(&mut self) {
        let (image_w, image_h) = self.image_dims();
        let scale = self.transform.uniform_scale();

        if scale < self.min_scale {
            let target = fit_cover_transform(
                image_w,
                image_h,
                self.rotation_degrees as f64,
                self.crop,
            );
            // The target scale is already known; commit it up front.
            self.current_scale = target.uniform_scale();
            self.settle = Some(Settle::recenter(self.transform, target));
            return;
        }

        let bounds = self.transform.map_rect(Rect::of_size(image_w, image_h));
        let (tx, ty) = self.transform.translation();
        let mut corrected = (tx, ty);
        let mut overflowed = false;

        if bounds.left > self.crop.left as f64 {
            corrected.0 = tx + (self.crop.left as f64 - bounds.left);
            overflowed = true;
        } else if bounds.right < self.crop.right() as f64 {
            corrected.0 = tx + (self.crop.right() as f64 - bounds.right);
            overflowed = true;
        }

        if bounds.top > self.crop.top as f64 {
            corrected.1 = ty + (self.crop.top as f64 - bounds.top);
            overflowed = true;
        } else if bounds.bottom < self.crop.bottom() as f64 {
            corrected.1 = ty + (self.crop.bottom() as f64 - bounds.bottom);
            overflowed = true;
        }

        if overflowed {
            self.settle = Some(Settle::bounce((tx, ty), corrected));
        }
    }
}
