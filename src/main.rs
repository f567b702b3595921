use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use raylib::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use artifact_carousel::constants::*;
use artifact_carousel::engine::Engine;
use artifact_carousel::page::{PageEngine, PageOptions};
use artifact_carousel::{CarouselKind, Catalog, SearchField};

/// Museum front page with rotating artifact carousels.
#[derive(Debug, Parser)]
#[command(name = "artifact-carousel", version)]
struct Cli {
    /// Catalog JSON document or a directory of images. Built-in content when omitted.
    source: Option<PathBuf>,

    /// Directory images are resolved against (defaults to the source's directory)
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Gallery shown in the gallery panel
    #[arg(long, default_value = DEFAULT_GALLERY)]
    gallery: String,

    /// Seconds between hero slides
    #[arg(long)]
    hero_interval: Option<f32>,

    /// Seconds between featured slides
    #[arg(long)]
    featured_interval: Option<f32>,

    /// Seconds between gallery slides
    #[arg(long)]
    gallery_interval: Option<f32>,

    /// Seconds between dashboard slides
    #[arg(long)]
    dashboard_interval: Option<f32>,

    /// Artifact field searched: name, category, date or description
    #[arg(long, default_value = "name")]
    search_field: SearchField,

    /// Show only matching artifacts in the featured carousel
    #[arg(long)]
    search: Option<String>,

    /// Log carousel transitions
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn asset_dir(&self) -> PathBuf {
        if let Some(dir) = &self.assets {
            return dir.clone();
        }
        match &self.source {
            Some(source) if source.is_dir() => source.clone(),
            Some(source) => source.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(".")),
            None => PathBuf::from("assets/images"),
        }
    }

    fn intervals(&self) -> Result<HashMap<CarouselKind, Duration>> {
        let mut intervals = HashMap::new();
        for (kind, secs) in [
            (CarouselKind::Hero, self.hero_interval),
            (CarouselKind::Featured, self.featured_interval),
            (CarouselKind::Gallery, self.gallery_interval),
            (CarouselKind::Dashboard, self.dashboard_interval),
        ] {
            if let Some(secs) = secs {
                let interval = Duration::try_from_secs_f32(secs)
                    .with_context(|| format!("invalid {} interval: {}", kind, secs))?;
                intervals.insert(kind, interval);
            }
        }
        Ok(intervals)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .init();

    let catalog = Catalog::load_or_fallback(cli.source.as_deref());
    let options = PageOptions {
        asset_dir: cli.asset_dir(),
        gallery: cli.gallery.clone(),
        intervals: cli.intervals()?,
        search: cli.search.clone().map(|value| (cli.search_field, value)),
    };
    info!(assets = %options.asset_dir.display(), gallery = %options.gallery, "starting");

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Museum Artifact Carousels")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut engine = PageEngine::new(options);
    if !engine.initialize(&mut rl, &thread, &catalog) {
        error!("no carousel has anything to show");
    }

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow::anyhow!("failed to create render texture: {}", e))?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        engine.render_frame(dt, &mut rl, &thread, &mut framebuffer);

        // Draw the vertically flipped framebuffer scaled to the window
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    Ok(())
}
