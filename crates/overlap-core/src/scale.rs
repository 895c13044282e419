use tracing::debug;

use crate::error::{OverlapError, Result};
use crate::geometry::Size;

/// Largest factor that fits `natural` entirely inside `container`.
pub fn fit_to_container(container: Size, natural: Size) -> Result<f32> {
    if !container.is_positive() {
        return Err(OverlapError::InvalidContainer {
            width: container.width,
            height: container.height,
        });
    }
    if !natural.is_positive() {
        return Err(OverlapError::InvalidConfig(format!(
            "image has no pixels ({}x{})",
            natural.width, natural.height
        )));
    }
    let scale_x = container.width / natural.width;
    let scale_y = container.height / natural.height;
    Ok(scale_x.min(scale_y))
}

/// Holds the single display scale shared by every loaded image.
///
/// The first image resolved after construction or [`ScaleResolver::clear`]
/// fixes the scale; every later image reuses it regardless of its own size.
#[derive(Clone, Debug, Default)]
pub struct ScaleResolver {
    shared: Option<f32>,
}

impl ScaleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared_scale(&self) -> Option<f32> {
        self.shared
    }

    /// Scale to apply to an image of size `natural`, fixing it on first use.
    pub fn resolve(&mut self, container: Size, natural: Size) -> Result<f32> {
        if let Some(scale) = self.shared {
            return Ok(scale);
        }
        let scale = fit_to_container(container, natural)?;
        debug!(scale, "Shared scale fixed by first image");
        self.shared = Some(scale);
        Ok(scale)
    }

    pub fn clear(&mut self) {
        self.shared = None;
    }
}
