//! Viewport and crop-region geometry.
//!
//! The crop region is always the centered square covering 80% of the shorter
//! viewport axis. Everything that needs to know where the image "belongs" -
//! initial layout, the re-center animation target, and every frame of the
//! rotate animation - goes through [`fit_cover_transform`], so all three paths
//! agree exactly.

use serde::{Deserialize, Serialize};

use crate::affine::{Affine, Rect};

/// Fraction of the shorter viewport axis occupied by the crop square.
const CROP_FRACTION: f64 = 0.8;

/// Hard upper bound on the image scale during pinch zoom.
pub const MAX_SCALE: f64 = 4.0;

/// The centered square crop region, derived from the viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    /// Left edge in viewport pixels.
    pub left: u32,
    /// Top edge in viewport pixels.
    pub top: u32,
    /// Side length of the square in viewport pixels.
    pub size: u32,
}

impl CropRect {
    pub fn right(&self) -> u32 {
        self.left + self.size
    }

    pub fn bottom(&self) -> u32 {
        self.top + self.size
    }

    /// Center of the crop square.
    pub fn center(&self) -> (f64, f64) {
        (
            self.left as f64 + self.size as f64 / 2.0,
            self.top as f64 + self.size as f64 / 2.0,
        )
    }

    /// The crop region as an f64 rectangle.
    pub fn as_rect(&self) -> Rect {
        Rect::new(
            self.left as f64,
            self.top as f64,
            self.right() as f64,
            self.bottom() as f64,
        )
    }
}

/// Compute the crop square for a viewport of the given dimensions.
///
/// The square side is `floor(0.8 * min(width, height))` and the square is
/// centered on both axes (integer division, matching the on-screen overlay).
pub fn compute_crop_rect(view_width: u32, view_height: u32) -> CropRect {
    let size = (view_width.min(view_height) as f64 * CROP_FRACTION) as u32;
    CropRect {
        left: (view_width - size) / 2,
        top: (view_height - size) / 2,
        size,
    }
}

/// Image dimensions as they count towards cover-scaling at a given rotation.
///
/// Width and height swap whenever the integer part of the rotation is not a
/// multiple of 180 degrees. The rotation may be fractional mid-animation;
/// truncation keeps the swap behavior identical to the resting 90/270 cases
/// once the angle passes one degree.
pub fn effective_dims(image_w: f64, image_h: f64, rotation_deg: f64) -> (f64, f64) {
    if (rotation_deg.trunc() as i64).rem_euclid(180) != 0 {
        (image_h, image_w)
    } else {
        (image_w, image_h)
    }
}

/// The smallest scale at which the (rotation-adjusted) image covers the crop
/// square on both axes.
pub fn min_cover_scale(image_w: f64, image_h: f64, rotation_deg: f64, crop_size: u32) -> f64 {
    let (eff_w, eff_h) = effective_dims(image_w, image_h, rotation_deg);
    let crop = crop_size as f64;
    (crop / eff_w).max(crop / eff_h)
}

/// Build the canonical transform for an image at the given rotation:
/// cover-scale it, rotate it about the scaled image's center, and center the
/// rotated bounding box on the crop square.
///
/// # Arguments
///
/// * `image_w`, `image_h` - intrinsic image dimensions in pixels
/// * `rotation_deg` - rotation in degrees; fractional values occur while the
///   rotate animation is in flight
/// * `crop` - the crop square from [`compute_crop_rect`]
pub fn fit_cover_transform(image_w: f64, image_h: f64, rotation_deg: f64, crop: CropRect) -> Affine {
    let scale = min_cover_scale(image_w, image_h, rotation_deg, crop.size);

    let mut m = Affine::identity();
    m.post_scale(scale, 0.0, 0.0);
    m.post_rotate(
        rotation_deg,
        (image_w * scale) / 2.0,
        (image_h * scale) / 2.0,
    );

    let bounds = m.map_rect(Rect::of_size(image_w, image_h));
    let (crop_cx, crop_cy) = crop.center();
    let (img_cx, img_cy) = bounds.center();

    m.post_translate(crop_cx - img_cx, crop_cy - img_cy);
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_crop_rect_square_viewport() {
        let crop = compute_crop_rect(1000, 1000);
        assert_eq!(crop.size, 800);
        assert_eq!(crop.left, 100);
        assert_eq!(crop.top, 100);
        assert_eq!(crop.right(), 900);
        assert_eq!(crop.bottom(), 900);
    }

    #[test]
    fn test_crop_rect_landscape_viewport() {
        let crop = compute_crop_rect(1920, 1080);
        assert_eq!(crop.size, 864); // floor(0.8 * 1080)
        assert_eq!(crop.left, (1920 - 864) / 2);
        assert_eq!(crop.top, (1080 - 864) / 2);
    }

    #[test]
    fn test_crop_rect_center() {
        let crop = compute_crop_rect(1000, 1000);
        assert_eq!(crop.center(), (500.0, 500.0));
    }

    #[test]
    fn test_effective_dims_resting_rotations() {
        assert_eq!(effective_dims(400.0, 200.0, 0.0), (400.0, 200.0));
        assert_eq!(effective_dims(400.0, 200.0, 90.0), (200.0, 400.0));
        assert_eq!(effective_dims(400.0, 200.0, 180.0), (400.0, 200.0));
        assert_eq!(effective_dims(400.0, 200.0, 270.0), (200.0, 400.0));
        assert_eq!(effective_dims(400.0, 200.0, 360.0), (400.0, 200.0));
    }

    #[test]
    fn test_effective_dims_fractional_rotation() {
        // Sub-degree angles round down to a multiple of 180: no swap yet.
        assert_eq!(effective_dims(400.0, 200.0, 0.5), (400.0, 200.0));
        // Past one degree the swap kicks in for the whole sweep to 90.
        assert_eq!(effective_dims(400.0, 200.0, 1.5), (200.0, 400.0));
        assert_eq!(effective_dims(400.0, 200.0, 45.0), (200.0, 400.0));
    }

    #[test]
    fn test_min_cover_scale_wide_image() {
        // 1000x1000 viewport -> 800 crop; 400x200 image.
        assert!(approx(min_cover_scale(400.0, 200.0, 0.0, 800), 4.0));
        // 90-degree rotation swaps dims; symmetric for this image.
        assert!(approx(min_cover_scale(400.0, 200.0, 90.0, 800), 4.0));
    }

    #[test]
    fn test_min_cover_scale_uses_larger_ratio() {
        // 800x400 image into an 800 crop: height is the binding axis.
        assert!(approx(min_cover_scale(800.0, 400.0, 0.0, 800), 2.0));
    }

    #[test]
    fn test_fit_cover_covers_crop_exactly() {
        let crop = compute_crop_rect(1000, 1000);
        let m = fit_cover_transform(400.0, 200.0, 0.0, crop);

        let bounds = m.map_rect(Rect::of_size(400.0, 200.0));
        // 400x200 at scale 4 -> 1600x800, centered on the crop.
        assert!(approx(bounds.width(), 1600.0));
        assert!(approx(bounds.height(), 800.0));
        assert!(bounds.left <= crop.left as f64 + 1e-6);
        assert!(bounds.top <= crop.top as f64 + 1e-6);
        assert!(bounds.right >= crop.right() as f64 - 1e-6);
        assert!(bounds.bottom >= crop.bottom() as f64 - 1e-6);
        // The binding axis has no slack at all.
        assert!(approx(bounds.top, crop.top as f64));
        assert!(approx(bounds.bottom, crop.bottom() as f64));
    }

    #[test]
    fn test_fit_cover_centers_on_crop() {
        let crop = compute_crop_rect(1200, 900);
        let m = fit_cover_transform(300.0, 500.0, 0.0, crop);

        let bounds = m.map_rect(Rect::of_size(300.0, 500.0));
        let (cx, cy) = crop.center();
        let (bx, by) = bounds.center();
        assert!(approx(cx, bx));
        assert!(approx(cy, by));
    }

    #[test]
    fn test_fit_cover_rotated_scale() {
        let crop = compute_crop_rect(1000, 1000);
        let m = fit_cover_transform(400.0, 200.0, 90.0, crop);

        // Scale component must equal the rotated min cover scale.
        assert!(approx(m.uniform_scale(), 4.0));

        // Rotated 400x200 has a 200x400 footprint, scaled by 4.
        let bounds = m.map_rect(Rect::of_size(400.0, 200.0));
        assert!(approx(bounds.width(), 800.0));
        assert!(approx(bounds.height(), 1600.0));
    }

    #[test]
    fn test_fit_cover_full_turn_matches_zero() {
        let crop = compute_crop_rect(900, 700);
        let at_zero = fit_cover_transform(640.0, 480.0, 0.0, crop);
        let full_turn = fit_cover_transform(640.0, 480.0, 360.0, crop);

        assert!(approx(at_zero.sx, full_turn.sx));
        assert!(approx(at_zero.kx, full_turn.kx));
        assert!(approx(at_zero.tx, full_turn.tx));
        assert!(approx(at_zero.ky, full_turn.ky));
        assert!(approx(at_zero.sy, full_turn.sy));
        assert!(approx(at_zero.ty, full_turn.ty));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
