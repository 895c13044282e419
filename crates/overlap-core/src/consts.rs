/// Number of image slots a session provides unless configured otherwise.
pub const DEFAULT_SLOT_COUNT: usize = 4;

/// Upper bound on configurable slots.
pub const MAX_SLOT_COUNT: usize = 4;

/// Default canvas width in display pixels.
pub const DEFAULT_CONTAINER_WIDTH: f32 = 500.0;

/// Default canvas height in display pixels.
pub const DEFAULT_CONTAINER_HEIGHT: f32 = 500.0;

/// Distance in display pixels a single nudge moves the selected image.
pub const DEFAULT_NUDGE_STEP: f32 = 10.0;

/// ITU-R BT.709 luminance coefficient for the red channel.
pub const LUMA_709_R: f32 = 0.2126;

/// ITU-R BT.709 luminance coefficient for the green channel.
pub const LUMA_709_G: f32 = 0.7152;

/// ITU-R BT.709 luminance coefficient for the blue channel.
pub const LUMA_709_B: f32 = 0.0722;

/// Minimum pixel count at which per-pixel transforms switch to Rayon.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;
