use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_CONTAINER_HEIGHT, DEFAULT_CONTAINER_WIDTH, DEFAULT_NUDGE_STEP, DEFAULT_SLOT_COUNT,
    MAX_SLOT_COUNT,
};
use crate::error::{OverlapError, Result};
use crate::geometry::Size;

/// How empty slots lock when sequential filling is enforced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelockPolicy {
    /// Only the first empty slot is open; removing an image re-locks every
    /// later empty slot.
    #[default]
    Dynamic,
    /// A slot that was ever open stays open until the session is reset.
    HighWater,
}

impl fmt::Display for RelockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dynamic => write!(f, "Dynamic"),
            Self::HighWater => write!(f, "High Water"),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Canvas width in display pixels.
    pub container_width: f32,
    /// Canvas height in display pixels.
    pub container_height: f32,
    /// Number of image slots, 1..=4.
    pub slot_count: usize,
    /// Display pixels moved per nudge.
    pub nudge_step_pixels: f32,
    /// Require slots to be filled in order (A before B before C ...).
    pub enforce_sequential_slot_filling: bool,
    pub relock_policy: RelockPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            slot_count: DEFAULT_SLOT_COUNT,
            nudge_step_pixels: DEFAULT_NUDGE_STEP,
            enforce_sequential_slot_filling: true,
            relock_policy: RelockPolicy::default(),
        }
    }
}

impl SessionConfig {
    pub fn container(&self) -> Size {
        Size::new(self.container_width, self.container_height)
    }

    pub fn validate(&self) -> Result<()> {
        let c = self.container();
        if !(c.width.is_finite() && c.height.is_finite() && c.is_positive()) {
            return Err(OverlapError::InvalidContainer {
                width: c.width,
                height: c.height,
            });
        }
        if self.slot_count == 0 || self.slot_count > MAX_SLOT_COUNT {
            return Err(OverlapError::InvalidConfig(format!(
                "slot_count must be 1..={MAX_SLOT_COUNT}, got {}",
                self.slot_count
            )));
        }
        if !self.nudge_step_pixels.is_finite() || self.nudge_step_pixels <= 0.0 {
            return Err(OverlapError::InvalidConfig(format!(
                "nudge_step_pixels must be positive, got {}",
                self.nudge_step_pixels
            )));
        }
        Ok(())
    }
}
