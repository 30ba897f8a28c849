use crate::core::consts::MAX_DEPTH;
use nonzero::nonzero;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use valuable::Valuable;

#[derive(Copy, Clone, Debug, PartialEq, Valuable, Serialize, Deserialize)]
pub struct RenderOpts {
    /// The target dimensions of the render
    pub width: NonZeroUsize,
    pub height: NonZeroUsize,
    /// How many times a ray may be shaded; each reflection uses up one level
    pub ray_depth: usize,
}

impl RenderOpts {
    /// Returns the dimensions of the render (width and height)
    pub fn dims(&self) -> [usize; 2] { [self.width.get(), self.height.get()] }
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            width: nonzero!(512_usize),
            height: nonzero!(512_usize),
            ray_depth: MAX_DEPTH,
        }
    }
}
