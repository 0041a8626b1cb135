//! Image composition: paste one image onto another.

use image::{GrayImage, Rgb, RgbImage};

/// Paste a grayscale image onto `base` with its top-left corner at (`x`, `y`).
///
/// Pixels falling outside `base` are dropped.
pub fn paste_gray(base: &mut RgbImage, top: &GrayImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let v = pixel[0];
            base.put_pixel(target_x, target_y, Rgb([v, v, v]));
        }
    }
}
