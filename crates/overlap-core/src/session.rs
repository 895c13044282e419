use std::collections::BTreeMap;

use image::RgbaImage;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{RelockPolicy, SessionConfig};
use crate::crop::generate_crop;
use crate::error::{OverlapError, Result};
use crate::geometry::{Point, Rect};
use crate::interaction::{hit_test, nudge, DragController, Direction};
use crate::results::{CropImage, Results};
use crate::slot::SlotId;
use crate::store::PlacementStore;

/// What the UI should show for one slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotView {
    pub id: SlotId,
    pub visible: bool,
    pub selected: bool,
    /// Sequential filling forbids loading into this slot yet.
    pub locked: bool,
    /// A decode request is pending.
    pub loading: bool,
}

/// Result of a decode completion for one slot.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    Placed(SlotId),
    /// Decoding failed; the slot stays empty.
    Failed { slot: SlotId, reason: String },
}

impl LoadOutcome {
    pub fn slot(&self) -> SlotId {
        match self {
            Self::Placed(id) => *id,
            Self::Failed { slot, .. } => *slot,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Self::Placed(_))
    }
}

/// The interface UI glue drives: slot loading, selection, movement and
/// processing, plus the derived outputs to render.
///
/// Decoding is the one asynchronous step. [`Session::request_load`] only
/// queues bytes; slots become visible when [`Session::complete_loads`]
/// delivers the decoded images.
pub struct Session {
    config: SessionConfig,
    store: PlacementStore,
    drag: DragController,
    results: Results,
    pending: BTreeMap<SlotId, Vec<u8>>,
    high_water: usize,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let store = PlacementStore::new(config.container(), config.slot_count)?;
        let results = Results::new(config.slot_count);
        Ok(Self {
            config,
            store,
            drag: DragController::new(),
            results,
            pending: BTreeMap::new(),
            high_water: 0,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    pub fn results(&self) -> &Results {
        &self.results
    }

    pub fn selected(&self) -> Option<SlotId> {
        self.store.selected()
    }

    pub fn intersection(&self) -> Option<Rect> {
        self.store.intersection()
    }

    /// Processing needs at least two visible images.
    pub fn processing_enabled(&self) -> bool {
        self.store.visible_count() >= 2
    }

    pub fn is_loading(&self, id: SlotId) -> bool {
        self.pending.contains_key(&id)
    }

    fn first_open_index(&self) -> usize {
        self.store
            .slots()
            .iter()
            .position(|s| !s.is_visible() && !self.is_loading(s.id()))
            .unwrap_or(self.config.slot_count)
    }

    fn refresh_high_water(&mut self) {
        self.high_water = self.high_water.max(self.first_open_index());
    }

    pub fn is_locked(&self, id: SlotId) -> bool {
        if !self.config.enforce_sequential_slot_filling
            || self.store.is_visible(id)
            || self.is_loading(id)
        {
            return false;
        }
        let open_through = match self.config.relock_policy {
            RelockPolicy::Dynamic => self.first_open_index(),
            RelockPolicy::HighWater => self.high_water.max(self.first_open_index()),
        };
        id.index() > open_through
    }

    pub fn slot_views(&self) -> Vec<SlotView> {
        let selected = self.store.selected();
        self.store
            .slots()
            .iter()
            .map(|s| SlotView {
                id: s.id(),
                visible: s.is_visible(),
                selected: selected == Some(s.id()),
                locked: self.is_locked(s.id()),
                loading: self.is_loading(s.id()),
            })
            .collect()
    }

    /// Queue `bytes` for decoding into `id`. Returns immediately; the slot
    /// stays invisible until [`Session::complete_loads`].
    ///
    /// Unknown and locked slots are ignored. A second request for the same
    /// slot replaces the first.
    pub fn request_load(&mut self, id: SlotId, bytes: Vec<u8>) -> bool {
        if self.store.slot(id).is_none() {
            debug!(slot = %id, "Load ignored: unknown slot");
            return false;
        }
        if self.is_locked(id) {
            debug!(slot = %id, "Load ignored: slot is locked");
            return false;
        }
        self.pending.insert(id, bytes);
        self.refresh_high_water();
        true
    }

    /// Decode every pending request and place the images, in slot order.
    ///
    /// Decoding runs in parallel; placement happens here on the caller's
    /// thread so the first placed image fixes the shared scale
    /// deterministically.
    pub fn complete_loads(&mut self) -> Vec<LoadOutcome> {
        let pending = std::mem::take(&mut self.pending);
        self.place_decoded(pending)
    }

    /// Queue and immediately complete a single load. Requests already
    /// queued for other slots stay pending.
    pub fn load_image(&mut self, id: SlotId, bytes: Vec<u8>) -> Option<LoadOutcome> {
        if !self.request_load(id, bytes) {
            return None;
        }
        let bytes = self.pending.remove(&id)?;
        self.place_decoded(BTreeMap::from([(id, bytes)])).pop()
    }

    fn place_decoded(&mut self, batch: BTreeMap<SlotId, Vec<u8>>) -> Vec<LoadOutcome> {
        let mut decoded: Vec<(SlotId, std::result::Result<RgbaImage, String>)> = batch
            .into_par_iter()
            .map(|(id, bytes)| {
                let img = image::load_from_memory(&bytes)
                    .map(|i| i.to_rgba8())
                    .map_err(|e| e.to_string());
                (id, img)
            })
            .collect();
        decoded.sort_by_key(|(id, _)| *id);

        let mut outcomes = Vec::with_capacity(decoded.len());
        for (id, img) in decoded {
            let placed = img.and_then(|pixels| {
                self.store
                    .set_image(id, pixels)
                    .map_err(|e| e.to_string())
            });
            match placed {
                Ok(()) => {
                    info!(slot = %id, "Image loaded");
                    outcomes.push(LoadOutcome::Placed(id));
                }
                Err(reason) => {
                    let err = OverlapError::Decode {
                        slot: id,
                        reason: reason.clone(),
                    };
                    warn!("{err}");
                    outcomes.push(LoadOutcome::Failed { slot: id, reason });
                }
            }
        }
        self.refresh_high_water();
        outcomes
    }

    pub fn select_slot(&mut self, id: SlotId) -> bool {
        self.store.select(id)
    }

    /// Unload `id` and cancel any decode still pending for it.
    pub fn remove_slot(&mut self, id: SlotId) -> bool {
        let cancelled = self.pending.remove(&id).is_some();
        if cancelled {
            debug!(slot = %id, "Pending load cancelled");
        }
        if self.drag.dragging_slot() == Some(id) {
            self.drag.pointer_up();
        }
        let removed = self.store.remove(id);
        cancelled || removed
    }

    /// Return to the initial state: no images, no scale, no results.
    pub fn reset_all(&mut self) {
        self.store.reset_all();
        self.pending.clear();
        self.drag.pointer_up();
        self.results.clear();
        self.high_water = 0;
        info!("Session reset");
    }

    pub fn move_slot(&mut self, id: SlotId, position: Point) -> bool {
        self.store.set_position(id, position)
    }

    pub fn nudge(&mut self, direction: Direction) -> bool {
        nudge(&mut self.store, direction, self.config.nudge_step_pixels)
    }

    pub fn pointer_down(&mut self, id: SlotId, pointer: Point) -> bool {
        self.drag.pointer_down(&mut self.store, id, pointer)
    }

    /// Pointer down at a canvas position, targeting the topmost slot there.
    pub fn pointer_down_at(&mut self, pointer: Point) -> Option<SlotId> {
        let id = hit_test(&self.store, pointer)?;
        self.pointer_down(id, pointer).then_some(id)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        self.drag.pointer_move(&mut self.store, pointer)
    }

    pub fn pointer_up(&mut self) {
        self.drag.pointer_up();
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Crop every visible image to the shared intersection, producing the
    /// plain and inverted result sets.
    ///
    /// Without a positive-area overlap of at least two images this returns
    /// [`OverlapError::InsufficientOverlap`] and leaves earlier results
    /// untouched. Slots that are not ready are skipped; any other crop error
    /// is returned before either result set changes.
    pub fn process(&mut self) -> Result<&Results> {
        let Some(intersection) = self.store.intersection() else {
            let visible = self.store.visible_count();
            warn!(visible, "Images do not overlap sufficiently");
            return Err(OverlapError::InsufficientOverlap { visible });
        };

        let jobs: Vec<_> = self
            .store
            .slots()
            .iter()
            .filter(|s| s.is_visible())
            .flat_map(|s| [(s, false), (s, true)])
            .collect();

        let attempts: Vec<Result<CropImage>> = jobs
            .par_iter()
            .map(|(slot, invert)| generate_crop(slot, &intersection, *invert))
            .collect();

        let mut crops = Vec::with_capacity(attempts.len());
        for attempt in attempts {
            match attempt {
                Ok(crop) => crops.push(crop),
                Err(OverlapError::NotReady(id)) => {
                    debug!(slot = %id, "Skipping slot that is not ready");
                }
                Err(e) => return Err(e),
            }
        }

        self.results.clear();
        for crop in crops {
            self.results.insert(crop);
        }

        info!(
            intersection = %intersection,
            crops = self.results.plain.filled_count(),
            "Processing complete"
        );
        Ok(&self.results)
    }
}
