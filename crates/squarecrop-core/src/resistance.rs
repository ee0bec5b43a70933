//! Elastic boundary resistance for drag gestures.
//!
//! While dragging, the image may recede slightly past the crop edge. The
//! further it has overflowed, the less of each additional pointer delta gets
//! applied (hyperbolic damping), and total overflow is hard-capped at 20% of
//! the crop size. The two axes are treated independently, and opposite edges
//! on one axis can never overflow at the same time because the image always
//! covers the crop square at rest.

use crate::affine::{Affine, Rect};
use crate::viewport::CropRect;

/// Damping constant: at `overflow == RESISTANCE_FACTOR` pixels the applied
/// delta is halved.
const RESISTANCE_FACTOR: f64 = 400.0;

/// Maximum overflow past any crop edge, as a fraction of the crop size.
const MAX_OVERSCROLL_RATIO: f64 = 0.2;

/// Hyperbolic damping factor for a given overflow distance.
fn damping(overflow: f64) -> f64 {
    1.0 / (1.0 + overflow / RESISTANCE_FACTOR)
}

/// Resist one axis of a proposed delta given how far the relevant edge has
/// overflowed at the proposed position.
///
/// `overflow` is the signed distance past the edge (positive = overflowed);
/// `sign` is +1.0 when a positive delta increases the overflow (left/top
/// edges) and -1.0 when a negative delta does (right/bottom edges).
fn resist_axis(proposed: f64, overflow: f64, max_overscroll: f64, sign: f64) -> f64 {
    if overflow <= 0.0 {
        proposed
    } else if overflow > max_overscroll {
        // Give back exactly the excess so total overflow caps at the max.
        proposed - sign * (overflow - max_overscroll)
    } else {
        proposed * damping(overflow)
    }
}

/// Apply boundary resistance to a proposed drag delta.
///
/// Projects `start` translated by `(dx, dy)`, measures how far the image's
/// bounding box has receded past each crop edge, and returns the damped or
/// clamped delta to actually apply. Pure function; called once per
/// pointer-move.
///
/// # Arguments
///
/// * `dx`, `dy` - proposed delta relative to the gesture-start transform
/// * `start` - transform snapshot taken at gesture start
/// * `image_w`, `image_h` - intrinsic image dimensions
/// * `crop` - the crop square
pub fn resist(
    dx: f64,
    dy: f64,
    start: &Affine,
    image_w: f64,
    image_h: f64,
    crop: CropRect,
) -> (f64, f64) {
    let mut projected = *start;
    projected.post_translate(dx, dy);
    let bounds = projected.map_rect(Rect::of_size(image_w, image_h));

    let max_overscroll = crop.size as f64 * MAX_OVERSCROLL_RATIO;

    let mut resisted_dx = dx;
    let mut resisted_dy = dy;

    if bounds.left > crop.left as f64 {
        let overflow = bounds.left - crop.left as f64;
        resisted_dx = resist_axis(dx, overflow, max_overscroll, 1.0);
    } else if bounds.right < crop.right() as f64 {
        let overflow = crop.right() as f64 - bounds.right;
        resisted_dx = resist_axis(dx, overflow, max_overscroll, -1.0);
    }

    if bounds.top > crop.top as f64 {
        let overflow = bounds.top - crop.top as f64;
        resisted_dy = resist_axis(dy, overflow, max_overscroll, 1.0);
    } else if bounds.bottom < crop.bottom() as f64 {
        let overflow = crop.bottom() as f64 - bounds.bottom;
        resisted_dy = resist_axis(dy, overflow, max_overscroll, -1.0);
    }

    (resisted_dx, resisted_dy)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
