use image::RgbaImage;
use rayon::prelude::*;

use crate::consts::{LUMA_709_B, LUMA_709_G, LUMA_709_R, PARALLEL_PIXEL_THRESHOLD};

/// BT.709 luma of an 8-bit RGB triple, in 0.0..=255.0.
pub fn luma_709(r: u8, g: u8, b: u8) -> f32 {
    LUMA_709_R * r as f32 + LUMA_709_G * g as f32 + LUMA_709_B * b as f32
}

/// Grey level written for a pixel: `255 - L`, rounded to the nearest step.
pub fn inverted_luma(r: u8, g: u8, b: u8) -> u8 {
    (255.0 - luma_709(r, g, b)).round().clamp(0.0, 255.0) as u8
}

fn invert_pixel(px: &mut [u8]) {
    let v = inverted_luma(px[0], px[1], px[2]);
    px[0] = v;
    px[1] = v;
    px[2] = v;
}

/// Desaturate and invert in one pass: every pixel becomes the grey level
/// `255 - L`. Alpha is left untouched.
///
/// This is not a channel-wise RGB invert; a saturated red becomes a light
/// grey, not cyan.
pub fn invert_luminance(image: &mut RgbaImage) {
    let pixel_count = (image.width() as usize) * (image.height() as usize);
    let buf: &mut [u8] = image;
    if pixel_count >= PARALLEL_PIXEL_THRESHOLD {
        buf.par_chunks_exact_mut(4).for_each(invert_pixel);
    } else {
        buf.chunks_exact_mut(4).for_each(invert_pixel);
    }
}
