use thiserror::Error;

use crate::slot::SlotId;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Slot {0} is not ready: image has not finished decoding")]
    NotReady(SlotId),

    #[error("Images do not overlap sufficiently ({visible} visible)")]
    InsufficientOverlap { visible: usize },

    #[error("Invalid slot reference: {0}")]
    InvalidSlot(SlotId),

    #[error("Unknown slot label '{0}'")]
    UnknownSlotLabel(String),

    #[error("Failed to decode image for slot {slot}: {reason}")]
    Decode { slot: SlotId, reason: String },

    #[error("Invalid container dimensions: {width}x{height}")]
    InvalidContainer { width: f32, height: f32 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, OverlapError>;
