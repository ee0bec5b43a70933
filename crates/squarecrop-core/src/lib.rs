//! Squarecrop Core - Interactive image-cropping engine
//!
//! This crate provides the toolkit-independent core of the cropping widget:
//! affine transform bookkeeping, fit-cover geometry, elastic boundary
//! resistance, the gesture state machine, settle/rotate animations, and the
//! final crop extraction. A thin platform adapter feeds it pointer/pinch
//! events and a frame clock, and blits whatever [`view::CropView`] says to
//! draw.

pub mod affine;
pub mod animation;
pub mod extract;
pub mod gesture;
pub mod raster;
pub mod resistance;
pub mod view;
pub mod viewport;

pub use affine::{Affine, Rect};
pub use gesture::{GestureMode, Pinch, PinchDetector, PointerEvent, RotateHotspot};
pub use raster::{Raster, RasterError};
pub use resistance::resist;
pub use view::CropView;
pub use viewport::{compute_crop_rect, fit_cover_transform, min_cover_scale, CropRect, MAX_SCALE};
