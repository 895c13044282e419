use image::imageops;

use crate::error::{OverlapError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::invert::invert_luminance;
use crate::results::{CropImage, CropVariant};
use crate::slot::ImageSlot;

/// A region in a slot's native pixel coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Map a display-space `intersection` into the native pixel space of an
    /// image shown at `position` with `display` size.
    ///
    /// Rounding: width and height are `round(W * s)` and `round(H * s)`
    /// (half away from zero, at least 1, at most the source extent). The
    /// origin is rounded the same way and then shifted so the window stays
    /// inside the source. Shifting never changes the output size, so every
    /// slot cropped against the same intersection gets the same dimensions
    /// whenever their scales agree.
    pub fn for_display_region(
        intersection: &Rect,
        position: Point,
        display: Size,
        natural: Size,
    ) -> Result<CropRect> {
        if !display.is_positive() || !natural.is_positive() {
            return Err(OverlapError::InvalidConfig(format!(
                "cannot map crop into a {}x{} image",
                natural.width, natural.height
            )));
        }
        let s = natural.width / display.width;

        let src_w = natural.width.round() as u32;
        let src_h = natural.height.round() as u32;

        let width = round_extent(intersection.width() * s, src_w);
        let height = round_extent(intersection.height() * s, src_h);

        let source_x = (intersection.left - position.x) * s;
        let source_y = (intersection.top - position.y) * s;

        Ok(CropRect {
            x: clamp_origin(source_x, width, src_w),
            y: clamp_origin(source_y, height, src_h),
            width,
            height,
        })
    }
}

fn round_extent(value: f32, limit: u32) -> u32 {
    (value.round().max(1.0) as u32).min(limit)
}

fn clamp_origin(value: f32, extent: u32, limit: u32) -> u32 {
    let max_origin = limit.saturating_sub(extent) as f32;
    value.round().clamp(0.0, max_origin) as u32
}

/// Crop `slot` to the shared `intersection`, optionally inverting luminance.
///
/// A slot without decoded pixels yields [`OverlapError::NotReady`]; the
/// caller should retry after the load completes.
pub fn generate_crop(slot: &ImageSlot, intersection: &Rect, invert: bool) -> Result<CropImage> {
    let source = slot.source().ok_or(OverlapError::NotReady(slot.id()))?;
    let (position, display, natural) = match (
        slot.position(),
        slot.display_size(),
        slot.natural_size(),
    ) {
        (Some(p), Some(d), Some(n)) => (p, d, n),
        _ => return Err(OverlapError::NotReady(slot.id())),
    };

    let rect = CropRect::for_display_region(intersection, position, display, natural)?;
    let mut image = imageops::crop_imm(source, rect.x, rect.y, rect.width, rect.height).to_image();

    let variant = if invert {
        invert_luminance(&mut image);
        CropVariant::Inverted
    } else {
        CropVariant::Plain
    };

    Ok(CropImage {
        slot: slot.id(),
        variant,
        rect,
        image,
    })
}
