use crate::cli::Args;
use crate::output::Format;
use crate::targets::MAIN;
use anyhow::{anyhow, Context};
use clap::Parser;
use flaketrace_engine::render::renderer::Renderer;
use flaketrace_engine::scene::loader;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod cli;
mod output;
mod targets;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.log_level.into())?;

    let opts = args.render_opts();
    info!(target: MAIN, scenes = ?args.scenes, size = %args.size, depth = opts.ray_depth, bvh = %args.bvh, "starting");

    // Check before rendering, so a bad path doesn't waste a whole render
    let format = Format::from_path(&args.output)?;

    let start = puffin::now_ns();
    let mut scene = loader::load_files(&args.scenes).context("failed to load scene")?;
    scene
        .set_bvh_mode(args.bvh)
        .context("failed to configure acceleration tree")?;
    debug!(target: MAIN, elapsed = ?elapsed_since(start), primitives = scene.primitives().len(), "scene loaded");

    let render = Renderer::new(opts)
        .render(&scene)
        .context("failed to render scene")?;
    info!(target: MAIN, duration = ?render.stats.duration, num_px = render.stats.num_px, "render finished");

    output::save(&render.img, &args.output)
        .with_context(|| format!("failed to write image to `{}`", args.output.display()))?;
    info!(target: MAIN, path = %args.output.display(), %format, total = ?elapsed_since(start), "image saved");

    Ok(())
}

fn elapsed_since(start_ns: puffin::NanoSecond) -> Duration { Duration::from_nanos(puffin::now_ns().abs_diff(start_ns)) }

/// Installs the global log subscriber. `RUST_LOG` overrides the level given on the command line
fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env()
        .context("invalid `RUST_LOG` filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed installing log subscriber: {e:#?}"))
}
