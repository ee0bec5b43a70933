//! 2D affine transform used to position the image inside the viewport.
//!
//! The transform maps image-space coordinates to viewport-space coordinates.
//! It is always a composition of a uniform scale, a rotation, and a
//! translation, so it never carries shear of its own; the skew components
//! exist only as the off-diagonal terms of the rotation.
//!
//! # Composition order
//!
//! All mutators are *post*-operations: the new operation is applied after the
//! existing map. `post_scale` then `post_rotate` then `post_translate` builds
//! "scale first, then rotate, then translate", which is the order the
//! fit-cover construction relies on.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in f64 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    /// Create a rectangle from its edges.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle spanning an image of the given intrinsic dimensions.
    pub fn of_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Center point of the rectangle.
    pub fn center(&self) -> (f64, f64) {
        (
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }
}

/// A 2D affine map stored as the top two rows of the 3x3 matrix:
///
/// ```text
/// | sx  kx  tx |   x' = sx*x + kx*y + tx
/// | ky  sy  ty |   y' = ky*x + sy*y + ty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Affine {
    pub sx: f64,
    pub kx: f64,
    pub tx: f64,
    pub ky: f64,
    pub sy: f64,
    pub ty: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            sx: 1.0,
            kx: 0.0,
            tx: 0.0,
            ky: 0.0,
            sy: 1.0,
            ty: 0.0,
        }
    }

    /// Map a point from image space to viewport space.
    pub fn map_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.sx * x + self.kx * y + self.tx,
            self.ky * x + self.sy * y + self.ty,
        )
    }

    /// Map a rectangle and return the axis-aligned bounding box of the result.
    ///
    /// For rotated transforms the output is the bounding box of the four
    /// mapped corners, matching how the widget measures the on-screen extent
    /// of the image.
    pub fn map_rect(&self, rect: Rect) -> Rect {
        let corners = [
            self.map_point(rect.left, rect.top),
            self.map_point(rect.right, rect.top),
            self.map_point(rect.left, rect.bottom),
            self.map_point(rect.right, rect.bottom),
        ];

        let mut out = Rect::new(
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        );
        for (x, y) in corners {
            out.left = out.left.min(x);
            out.top = out.top.min(y);
            out.right = out.right.max(x);
            out.bottom = out.bottom.max(y);
        }
        out
    }

    /// Translate the result of the current map by (dx, dy).
    pub fn post_translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    /// Uniformly scale the result of the current map by `s` about the pivot.
    pub fn post_scale(&mut self, s: f64, px: f64, py: f64) {
        self.sx *= s;
        self.kx *= s;
        self.ky *= s;
        self.sy *= s;
        self.tx = s * self.tx + (1.0 - s) * px;
        self.ty = s * self.ty + (1.0 - s) * py;
    }

    /// Rotate the result of the current map by `degrees` about the pivot.
    ///
    /// Positive angles rotate clockwise in the y-down viewport coordinate
    /// system.
    pub fn post_rotate(&mut self, degrees: f64, px: f64, py: f64) {
        let rad = degrees.to_radians();
        let (sin, cos) = rad.sin_cos();

        let Affine {
            sx,
            kx,
            tx,
            ky,
            sy,
            ty,
        } = *self;

        self.sx = cos * sx - sin * ky;
        self.kx = cos * kx - sin * sy;
        self.tx = cos * tx - sin * ty + px - cos * px + sin * py;
        self.ky = sin * sx + cos * ky;
        self.sy = sin * kx + cos * sy;
        self.ty = sin * tx + cos * ty + py - sin * px - cos * py;
    }

    /// Derived uniform scale factor of the map.
    ///
    /// For a scale-rotate-translate composition this recovers the scale
    /// exactly: the first column is `(s*cos, s*sin)`.
    pub fn uniform_scale(&self) -> f64 {
        (self.sx * self.sx + self.ky * self.ky).sqrt()
    }

    /// Current translation components.
    pub fn translation(&self) -> (f64, f64) {
        (self.tx, self.ty)
    }

    /// Overwrite only the translation components, keeping scale/rotation.
    pub fn set_translation(&mut self, tx: f64, ty: f64) {
        self.tx = tx;
        self.ty = ty;
    }

    /// Componentwise linear interpolation towards `other`.
    ///
    /// Used by the re-center animation, which tweens the whole transform
    /// between two known-good endpoints.
    pub fn lerp(&self, other: &Affine, t: f64) -> Affine {
        let l = |a: f64, b: f64| a + (b - a) * t;
        Affine {
            sx: l(self.sx, other.sx),
            kx: l(self.kx, other.kx),
            tx: l(self.tx, other.tx),
            ky: l(self.ky, other.ky),
            sy: l(self.sy, other.sy),
            ty: l(self.ty, other.ty),
        }
    }

    /// Invert the map, or `None` when it is degenerate.
    pub fn invert(&self) -> Option<Affine> {
        let det = self.sx * self.sy - self.kx * self.ky;
        if det.abs() < f64::EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Affine {
            sx: self.sy * inv_det,
            kx: -self.kx * inv_det,
            tx: (self.kx * self.ty - self.sy * self.tx) * inv_det,
            ky: -self.ky * inv_det,
            sy: self.sx * inv_det,
            ty: (self.ky * self.tx - self.sx * self.ty) * inv_det,
        })
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
