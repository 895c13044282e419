#![allow(dead_code)]

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use overlap_core::geometry::Size;
use overlap_core::store::PlacementStore;

/// Image whose pixel at (x, y) is `[x, y, 0, 255]` (coordinates wrap at 256).
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 0, 255]))
}

/// Uniformly filled image.
pub fn solid_image(width: u32, height: u32, px: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(px))
}

/// Encode an image as PNG bytes, as a file picker would hand them over.
pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode PNG");
    out.into_inner()
}

/// Four-slot store over a square container.
pub fn square_store(side: f32) -> PlacementStore {
    PlacementStore::new(Size::new(side, side), 4).expect("valid store")
}
