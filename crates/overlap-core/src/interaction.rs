use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::OverlapError;
use crate::geometry::Point;
use crate::slot::SlotId;
use crate::store::PlacementStore;

/// Arrow-key direction for nudging the selected image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: &'static [Self] = &[Self::Up, Self::Down, Self::Left, Self::Right];

    /// Display-space offset for one step of `step` pixels.
    pub fn offset(self, step: f32) -> (f32, f32) {
        match self {
            Self::Up => (0.0, -step),
            Self::Down => (0.0, step),
            Self::Left => (-step, 0.0),
            Self::Right => (step, 0.0),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
        }
    }
}

impl FromStr for Direction {
    type Err = OverlapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Self::Up),
            "down" | "d" => Ok(Self::Down),
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            other => Err(OverlapError::InvalidConfig(format!(
                "unknown direction '{other}'"
            ))),
        }
    }
}

/// Move the selected slot by one nudge step. No-op without a selection.
pub fn nudge(store: &mut PlacementStore, direction: Direction, step: f32) -> bool {
    let Some(id) = store.selected() else {
        debug!(%direction, "Nudge ignored: nothing selected");
        return false;
    };
    let Some(pos) = store.slot(id).and_then(|s| s.position()) else {
        return false;
    };
    let (dx, dy) = direction.offset(step);
    store.set_position(id, pos.offset(dx, dy))
}

/// Topmost visible slot under `point`.
///
/// The selected slot is drawn above the others; the rest stack in slot
/// order with later slots on top.
pub fn hit_test(store: &PlacementStore, point: Point) -> Option<SlotId> {
    let hits = |id: &SlotId| {
        store
            .slot(*id)
            .and_then(|s| s.bounds())
            .is_some_and(|b| b.contains(point))
    };
    if let Some(selected) = store.selected().filter(hits) {
        return Some(selected);
    }
    store.visible_ids().filter(hits).last()
}

/// Drag gesture state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        slot: SlotId,
        /// Pointer position when the gesture began.
        start_pointer: Point,
        /// Slot position when the gesture began.
        start_position: Point,
    },
}

/// Pointer-driven drag handling: `Idle -> Dragging -> Idle`.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn dragging_slot(&self) -> Option<SlotId> {
        match self.state {
            DragState::Dragging { slot, .. } => Some(slot),
            DragState::Idle => None,
        }
    }

    /// Begin dragging `id` and select it. Ignored while another drag is
    /// active or when `id` is not visible.
    pub fn pointer_down(&mut self, store: &mut PlacementStore, id: SlotId, pointer: Point) -> bool {
        if self.is_dragging() {
            debug!(slot = %id, "Pointer down ignored: drag already active");
            return false;
        }
        let Some(start_position) = store.slot(id).and_then(|s| s.position()) else {
            return false;
        };
        store.select(id);
        self.state = DragState::Dragging {
            slot: id,
            start_pointer: pointer,
            start_position,
        };
        true
    }

    /// Follow the pointer: the slot moves by the pointer's total displacement
    /// since the gesture began.
    pub fn pointer_move(&mut self, store: &mut PlacementStore, pointer: Point) -> bool {
        let DragState::Dragging {
            slot,
            start_pointer,
            start_position,
        } = self.state
        else {
            return false;
        };
        let delta = pointer.delta_from(start_pointer);
        store.set_position(slot, start_position.offset(delta.x, delta.y))
    }

    /// End the gesture (pointer up or cancel).
    pub fn pointer_up(&mut self) {
        self.state = DragState::Idle;
    }
}
