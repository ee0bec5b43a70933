//! Final crop extraction.
//!
//! Extraction renders the source image into an off-screen raster the size of
//! the viewport using the current transform (inverse mapping with bilinear
//! sampling), then copies the centered crop square out of it. The
//! intermediate raster is dropped as soon as the copy is done; only the crop
//! is returned.

use crate::affine::Affine;
use crate::raster::Raster;
use crate::viewport::CropRect;

/// Render the image into a viewport-sized raster under the given transform.
///
/// For every output pixel the inverse transform yields the source position,
/// which is bilinearly sampled; positions outside the source image come out
/// black, matching the empty viewport area around the image on screen.
///
/// Returns `None` when the transform is degenerate (not invertible).
pub fn render_viewport(
    image: &Raster,
    transform: &Affine,
    view_width: u32,
    view_height: u32,
) -> Option<Raster> {
    let inverse = transform.invert()?;

    let mut output = vec![0u8; (view_width as usize) * (view_height as usize) * 3];

    for dst_y in 0..view_height {
        for dst_x in 0..view_width {
            let (src_x, src_y) = inverse.map_point(dst_x as f64, dst_y as f64);
            let pixel = sample_bilinear(image, src_x, src_y);

            let dst_idx = ((dst_y as usize) * (view_width as usize) + dst_x as usize) * 3;
            output[dst_idx] = pixel[0];
            output[dst_idx + 1] = pixel[1];
            output[dst_idx + 2] = pixel[2];
        }
    }

    Some(Raster {
        width: view_width,
        height: view_height,
        pixels: output,
    })
}

/// Extract the crop square for the current transform.
///
/// Renders the full viewport and copies out the centered `crop.size`-sided
/// square. The output is always exactly `crop.size x crop.size` pixels.
///
/// Returns `None` when the image is empty, the viewport or crop has zero
/// size, or the transform cannot be inverted.
pub fn extract_crop(
    image: &Raster,
    transform: &Affine,
    view_width: u32,
    view_height: u32,
    crop: CropRect,
) -> Option<Raster> {
    if image.is_empty() || view_width == 0 || view_height == 0 || crop.size == 0 {
        return None;
    }

    let rendered = render_viewport(image, transform, view_width, view_height)?;

    let size = crop.size as usize;
    let mut output = vec![0u8; size * size * 3];

    // Copy pixel data row by row out of the rendered viewport.
    for y in 0..size {
        let src_y = crop.top as usize + y;
        let src_row_start = (src_y * view_width as usize + crop.left as usize) * 3;
        let dst_row_start = y * size * 3;

        output[dst_row_start..dst_row_start + size * 3]
            .copy_from_slice(&rendered.pixels[src_row_start..src_row_start + size * 3]);
    }

    Some(Raster {
        width: crop.size,
        height: crop.size,
        pixels: output,
    })
}

/// Get a pixel as [f64; 3] from the image at the given coordinates.
#[inline]
fn get_pixel_f64(image: &Raster, px: usize, py: usize) -> [f64; 3] {
    let idx = (py * image.width as usize + px) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation.
///
/// Out-of-bounds positions return black.
fn sample_bilinear(image: &Raster, x: f64, y: f64) -> [u8; 3] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 0.0 || x >= (w - 1) as f64 || y < 0.0 || y >= (h - 1) as f64 {
        return [0, 0, 0];
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_pixel_f64(image, x0, y0);
    let p10 = get_pixel_f64(image, x1, y0);
    let p01 = get_pixel_f64(image, x0, y1);
    let p11 = get_pixel_f64(image, x1, y1);

    let mut result = [0u8; 3];
    for i in 0..3 {
        let v = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
        result[i] = v.clamp(0.0, 255.0).round() as u8;
    }

    result
}
