use std::fmt;
use std::str::FromStr;

use image::RgbaImage;

use crate::consts::MAX_SLOT_COUNT;
use crate::error::OverlapError;
use crate::geometry::{Point, Rect, Size};

/// Stable identity of an image slot. Displayed as a letter: slot 0 is `A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotId(u8);

impl SlotId {
    pub const A: SlotId = SlotId(0);
    pub const B: SlotId = SlotId(1);
    pub const C: SlotId = SlotId(2);
    pub const D: SlotId = SlotId(3);

    /// Slot id for a zero-based index, if within the supported range.
    pub fn from_index(index: usize) -> Option<SlotId> {
        (index < MAX_SLOT_COUNT).then_some(SlotId(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn letter(self) -> char {
        (b'A' + self.0) as char
    }

    /// Lowercase form used for output file names.
    pub fn file_tag(self) -> char {
        self.letter().to_ascii_lowercase()
    }

    /// Human-facing caption for result listings.
    pub fn label(self) -> String {
        format!("Image {}", self.letter())
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for SlotId {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
                SlotId::from_index(index).ok_or_else(|| OverlapError::UnknownSlotLabel(s.into()))
            }
            _ => Err(OverlapError::UnknownSlotLabel(s.into())),
        }
    }
}

/// One placeholder that may hold a single loaded image.
///
/// Geometry is only meaningful while the slot is visible, so the accessors
/// return `None` otherwise.
#[derive(Clone, Debug)]
pub struct ImageSlot {
    pub(crate) id: SlotId,
    pub(crate) visible: bool,
    pub(crate) position: Point,
    pub(crate) display_size: Size,
    pub(crate) natural_size: Size,
    pub(crate) source: Option<RgbaImage>,
}

impl ImageSlot {
    pub fn new(id: SlotId) -> Self {
        Self {
            id,
            visible: false,
            position: Point::ORIGIN,
            display_size: Size::default(),
            natural_size: Size::default(),
            source: None,
        }
    }

    pub fn id(&self) -> SlotId {
        self.id
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn position(&self) -> Option<Point> {
        self.visible.then_some(self.position)
    }

    pub fn display_size(&self) -> Option<Size> {
        self.visible.then_some(self.display_size)
    }

    pub fn natural_size(&self) -> Option<Size> {
        self.visible.then_some(self.natural_size)
    }

    /// Decoded source pixels, present once the slot has been loaded.
    pub fn source(&self) -> Option<&RgbaImage> {
        self.source.as_ref().filter(|_| self.visible)
    }

    /// Display-space bounding box of a visible slot.
    pub fn bounds(&self) -> Option<Rect> {
        self.visible
            .then(|| Rect::from_origin_size(self.position, self.display_size))
    }

    /// Return to the empty, unplaced state.
    pub(crate) fn clear(&mut self) {
        *self = ImageSlot::new(self.id);
    }
}
