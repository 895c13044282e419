use image::RgbaImage;
use tracing::debug;

use crate::consts::MAX_SLOT_COUNT;
use crate::error::{OverlapError, Result};
use crate::geometry::{Point, Rect, Size};
use crate::intersection::compute_intersection;
use crate::scale::ScaleResolver;
use crate::slot::{ImageSlot, SlotId};

/// Owns every slot record, the shared scale and the current selection.
///
/// All geometry is in display space relative to the container origin.
/// The intersection is never cached: [`PlacementStore::intersection`]
/// recomputes it from the current slots on each call.
#[derive(Clone, Debug)]
pub struct PlacementStore {
    container: Size,
    slots: Vec<ImageSlot>,
    scale: ScaleResolver,
    selected: Option<SlotId>,
}

impl PlacementStore {
    pub fn new(container: Size, slot_count: usize) -> Result<Self> {
        if !container.is_positive() || !container.width.is_finite() || !container.height.is_finite() {
            return Err(OverlapError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }
        if slot_count == 0 || slot_count > MAX_SLOT_COUNT {
            return Err(OverlapError::InvalidConfig(format!(
                "slot count must be 1..={MAX_SLOT_COUNT}, got {slot_count}"
            )));
        }
        let slots = (0..slot_count)
            .filter_map(SlotId::from_index)
            .map(ImageSlot::new)
            .collect();
        Ok(Self {
            container,
            slots,
            scale: ScaleResolver::new(),
            selected: None,
        })
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn slots(&self) -> &[ImageSlot] {
        &self.slots
    }

    pub fn slot(&self, id: SlotId) -> Option<&ImageSlot> {
        self.slots.get(id.index())
    }

    pub fn shared_scale(&self) -> Option<f32> {
        self.scale.shared_scale()
    }

    pub fn selected(&self) -> Option<SlotId> {
        self.selected
    }

    pub fn is_visible(&self, id: SlotId) -> bool {
        self.slot(id).is_some_and(ImageSlot::is_visible)
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = SlotId> + '_ {
        self.slots.iter().filter(|s| s.visible).map(|s| s.id)
    }

    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| s.visible).count()
    }

    /// Common region of all visible slots, recomputed from current state.
    pub fn intersection(&self) -> Option<Rect> {
        compute_intersection(&self.slots)
    }

    /// Place a decoded image into `id`, centered in the container.
    ///
    /// The first image since the last reset fixes the shared scale. The slot
    /// becomes visible and selected. Loading into an already visible slot
    /// replaces its image.
    pub fn set_image(&mut self, id: SlotId, pixels: RgbaImage) -> Result<()> {
        if id.index() >= self.slots.len() {
            return Err(OverlapError::InvalidSlot(id));
        }
        let natural = Size::from(pixels.dimensions());
        let scale = self.scale.resolve(self.container, natural)?;
        let display_size = natural.scaled(scale);
        let position = Point::new(
            (self.container.width - display_size.width) / 2.0,
            (self.container.height - display_size.height) / 2.0,
        );

        let slot = &mut self.slots[id.index()];
        slot.natural_size = natural;
        slot.display_size = display_size;
        slot.position = position;
        slot.source = Some(pixels);
        slot.visible = true;

        debug!(
            slot = %id,
            natural_w = natural.width,
            natural_h = natural.height,
            display_w = display_size.width,
            display_h = display_size.height,
            "Image placed"
        );
        self.selected = Some(id);
        Ok(())
    }

    /// Move a visible slot. No clamping: slots may leave the container.
    ///
    /// Returns `false` (and changes nothing) for an unknown or invisible slot.
    pub fn set_position(&mut self, id: SlotId, position: Point) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) if slot.visible => {
                slot.position = position;
                true
            }
            _ => {
                debug!(slot = %id, "Ignoring move of a slot that is not visible");
                false
            }
        }
    }

    /// Unload a visible slot, moving the selection to the lowest remaining
    /// visible slot if it was selected.
    pub fn remove(&mut self, id: SlotId) -> bool {
        match self.slots.get_mut(id.index()) {
            Some(slot) if slot.visible => slot.clear(),
            _ => {
                debug!(slot = %id, "Ignoring removal of a slot that is not visible");
                return false;
            }
        }
        if self.selected == Some(id) {
            let first = self.visible_ids().next();
            self.selected = first;
        }
        true
    }

    /// Select a visible slot. Unknown or invisible slots leave the selection
    /// unchanged.
    pub fn select(&mut self, id: SlotId) -> bool {
        if !self.is_visible(id) {
            debug!(slot = %id, "Ignoring selection of a slot that is not visible");
            return false;
        }
        self.selected = Some(id);
        true
    }

    /// Clear every slot, the selection and the shared scale together.
    pub fn reset_all(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
        self.selected = None;
        self.scale.clear();
    }
}
