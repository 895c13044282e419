use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};

use crate::crop::CropRect;
use crate::error::Result;
use crate::slot::SlotId;

/// Which result collection a crop belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CropVariant {
    Plain,
    Inverted,
}

impl CropVariant {
    fn file_prefix(self) -> &'static str {
        match self {
            Self::Plain => "crop",
            Self::Inverted => "inverted",
        }
    }
}

impl fmt::Display for CropVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "Plain"),
            Self::Inverted => write!(f, "Inverted"),
        }
    }
}

/// A cropped image tagged with the slot it came from.
#[derive(Clone, Debug)]
pub struct CropImage {
    pub slot: SlotId,
    pub variant: CropVariant,
    /// Source window in the slot's native pixels.
    pub rect: CropRect,
    pub image: RgbaImage,
}

impl CropImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn label(&self) -> String {
        self.slot.label()
    }

    /// Conventional output file name, e.g. `crop_a.png`.
    pub fn file_name(&self) -> String {
        format!("{}_{}.png", self.variant.file_prefix(), self.slot.file_tag())
    }

    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Cursor::new(Vec::new());
        self.image.write_to(&mut out, ImageFormat::Png)?;
        Ok(out.into_inner())
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// One crop per slot, kept in slot order. Slots without output hold a
/// placeholder (`None`).
#[derive(Clone, Debug)]
pub struct ResultSet {
    entries: Vec<Option<CropImage>>,
}

impl ResultSet {
    pub fn with_placeholders(slot_count: usize) -> Self {
        Self {
            entries: vec![None; slot_count],
        }
    }

    /// Store `crop` at its slot's position, replacing whatever was there.
    pub fn insert(&mut self, crop: CropImage) {
        if let Some(entry) = self.entries.get_mut(crop.slot.index()) {
            *entry = Some(crop);
        }
    }

    pub fn get(&self, id: SlotId) -> Option<&CropImage> {
        self.entries.get(id.index()).and_then(Option::as_ref)
    }

    /// Every slot position in order, with its crop if one was produced.
    pub fn entries(&self) -> impl Iterator<Item = (SlotId, Option<&CropImage>)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, e)| SlotId::from_index(i).map(|id| (id, e.as_ref())))
    }

    /// Produced crops only, in slot order.
    pub fn crops(&self) -> impl Iterator<Item = &CropImage> {
        self.entries.iter().flatten()
    }

    pub fn filled_count(&self) -> usize {
        self.crops().count()
    }

    pub fn is_empty(&self) -> bool {
        self.filled_count() == 0
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
    }
}

/// The two result collections produced by a processing run.
#[derive(Clone, Debug)]
pub struct Results {
    pub plain: ResultSet,
    pub inverted: ResultSet,
}

impl Results {
    pub fn new(slot_count: usize) -> Self {
        Self {
            plain: ResultSet::with_placeholders(slot_count),
            inverted: ResultSet::with_placeholders(slot_count),
        }
    }

    pub fn set_mut(&mut self, variant: CropVariant) -> &mut ResultSet {
        match variant {
            CropVariant::Plain => &mut self.plain,
            CropVariant::Inverted => &mut self.inverted,
        }
    }

    pub fn insert(&mut self, crop: CropImage) {
        self.set_mut(crop.variant).insert(crop);
    }

    pub fn clear(&mut self) {
        self.plain.clear();
        self.inverted.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty() && self.inverted.is_empty()
    }

    /// Write every produced crop as PNG into `dir`, returning the paths.
    pub fn save_all(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        std::fs::create_dir_all(dir)?;
        let mut written = Vec::new();
        for crop in self.plain.crops().chain(self.inverted.crops()) {
            let path = dir.join(crop.file_name());
            crop.save_png(&path)?;
            written.push(path);
        }
        Ok(written)
    }
}
