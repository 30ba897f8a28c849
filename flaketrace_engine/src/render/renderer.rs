use crate::core::targets::*;
use crate::core::types::{Colour, Image, Number};
use crate::render::render::{Render, RenderStats};
use crate::render::render_opts::RenderOpts;
use crate::render::trace::trace as trace_ray;
use crate::scene::camera::{CamInvalidError, Viewport};
use crate::scene::Scene;
use puffin::{profile_function, profile_scope};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, trace, warn};

/// Renders scenes one pixel at a time, on the calling thread
#[derive(Copy, Clone, Debug)]
pub struct Renderer {
    opts: RenderOpts,
}

#[derive(Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("couldn't calculate viewport from scene camera")]
    Camera(#[from] CamInvalidError),
}

impl Renderer {
    pub fn new(opts: RenderOpts) -> Self { Self { opts } }

    pub fn opts(&self) -> &RenderOpts { &self.opts }

    /// Renders the scene into an (unclamped) image
    ///
    /// The scene's acceleration tree is built before the first pixel, if it hasn't been already,
    /// using the scene's own [Scene::bvh_mode].
    pub fn render(&self, scene: &Scene) -> Result<Render<Image>, RenderError> {
        profile_function!();

        let viewport = scene.camera().calculate_viewport().map_err(|err| {
            warn!(target: RENDERER, ?err, camera = ?scene.camera(), "couldn't calculate viewport");
            RenderError::from(err)
        })?;

        info!(target: RENDERER, opts = ?self.opts, bvh = %scene.bvh_mode(), "starting render");

        // Build now so that it isn't counted as part of the first pixel
        scene.bvh();

        let [w, h] = self.opts.dims();
        let depth = self.opts.ray_depth;

        let start = puffin::now_ns();
        let mut img = Image::new_filled(w, h, Colour::BLACK);
        for y in 0..h {
            profile_scope!("row");
            for x in 0..w {
                img[(x, y)] = Self::render_px(scene, &viewport, x, y, [w, h], depth);
            }
            trace!(target: RENDERER, row = y, of = h, "rendered row");
        }
        let duration = Duration::from_nanos(puffin::now_ns().abs_diff(start));

        let stats = RenderStats {
            duration,
            num_px: w * h,
            ray_depth: depth,
        };
        info!(target: RENDERER, ?duration, num_px = stats.num_px, "render complete");

        Ok(Render { img, stats })
    }

    /// Renders a single pixel in the scene, and returns the colour
    fn render_px(scene: &Scene, viewport: &Viewport, x: usize, y: usize, [w, h]: [usize; 2], depth: usize) -> Colour {
        let ray = viewport.calc_ray(x as Number, y as Number, w as Number, h as Number);
        trace_ray(scene, &ray, depth)
    }
}
