//! First-person grid viewer.
//!
//! ```bash
//! cargo run --release -- --level levels/level1.json --show-fps
//! ```
//!
//! Up/Down or W/S walk, Left/Right or A/D turn, Escape quits.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, Window, WindowOptions};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gridcast::{
    config::{DEFAULT_WALL_TEXTURE, Settings, TILE_SIZE},
    engine::Engine,
    level::{load_level, load_texture_dir},
    renderer::{PixelBuffer, Software},
    sim::Intent,
    world::{GridMap, TextureBank},
};

const FPS_REPORT_EVERY: Duration = Duration::from_secs(3);

#[derive(Parser, Debug)]
#[command(version, about = "Ray-cast a tile map in a window")]
struct Args {
    /// Level file: JSON object with `id` and a rectangular `map`.
    #[arg(long, default_value = "levels/level1.json")]
    level: PathBuf,

    /// Directory of PNG wall textures, keyed by file stem.
    #[arg(long, default_value = "assets/textures")]
    textures: PathBuf,

    /// Texture used on every wall.
    #[arg(long, default_value = DEFAULT_WALL_TEXTURE)]
    wall_texture: String,

    /// Solid-colour walls; no textures are loaded.
    #[arg(long)]
    flat: bool,

    /// Viewport width in pixels (default: map width in world units).
    #[arg(long)]
    width: Option<usize>,

    /// Viewport height in pixels (default: map height in world units).
    #[arg(long)]
    height: Option<usize>,

    /// Horizontal field of view, degrees.
    #[arg(long, default_value_t = 60.0)]
    fov: f64,

    /// Log the average frame rate every few seconds and on exit.
    #[arg(long)]
    show_fps: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

/// RGBA bytes → minifb's `0x00RRGGBB` words.
fn repack(fb: &PixelBuffer, out: &mut Vec<u32>) {
    out.clear();
    out.extend(
        fb.raw_bytes()
            .chunks_exact(4)
            .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2])),
    );
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    // ─────────── load level & textures ───────
    let level = load_level(&args.level)
        .with_context(|| format!("loading level {}", args.level.display()))?;
    let grid = GridMap::new(level, TILE_SIZE).context("building tile grid")?;

    let bank = if args.flat {
        TextureBank::new()
    } else {
        load_texture_dir(&args.textures)
            .with_context(|| format!("loading textures from {}", args.textures.display()))?
    };

    let defaults = Settings::for_grid(&grid);
    let settings = Settings {
        width: args.width.unwrap_or(defaults.width),
        height: args.height.unwrap_or(defaults.height),
        fov: args.fov.to_radians(),
        wall_texture: (!args.flat).then(|| args.wall_texture.clone()),
        ..defaults
    };
    anyhow::ensure!(
        settings.width > 0 && settings.height > 0,
        "viewport must be at least 1×1"
    );
    anyhow::ensure!(
        settings.fov > 0.0 && settings.fov < std::f64::consts::PI,
        "field of view must be between 0 and 180 degrees"
    );

    let (w, h) = (settings.width, settings.height);
    let target_fps = settings.target_fps;
    let mut engine = Engine::new(Software::new(w, h), grid, bank, settings)
        .context("resolving wall texture")?;

    // ─────────── window ───────
    let title = format!("gridcast – {}", engine.grid.id());
    let mut win = Window::new(&title, w, h, WindowOptions::default())?;
    win.set_target_fps(target_fps);

    let mut out: Vec<u32> = Vec::with_capacity(w * h);

    // ─────────── frame-rate bookkeeping ───────
    let started = Instant::now();
    let mut total_frames = 0usize;
    let mut acc_time = Duration::ZERO;
    let mut acc_frames = 0usize;
    let mut last_print = Instant::now();
    let mut last_tick = Instant::now();

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();
        let dt = t0.duration_since(last_tick).as_secs_f64();
        last_tick = t0;

        engine.avatar.walk = Intent::from_keys(
            win.is_key_down(Key::Down) || win.is_key_down(Key::S),
            win.is_key_down(Key::Up) || win.is_key_down(Key::W),
        );
        engine.avatar.turn = Intent::from_keys(
            win.is_key_down(Key::Left) || win.is_key_down(Key::A),
            win.is_key_down(Key::Right) || win.is_key_down(Key::D),
        );

        engine.update(dt);

        let mut shown = Ok(());
        engine.render_frame(|fb| {
            repack(fb, &mut out);
            shown = win.update_with_buffer(&out, fb.width(), fb.height());
        });
        shown?;

        total_frames += 1;
        acc_time += t0.elapsed();
        acc_frames += 1;

        if args.show_fps && last_print.elapsed() >= FPS_REPORT_EVERY {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames as f64;
            info!("avg frame: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }

    if args.show_fps && total_frames > 0 {
        let secs = started.elapsed().as_secs_f64();
        info!(
            frames = total_frames,
            "average over session: {:.1} FPS",
            total_frames as f64 / secs
        );
    }
    Ok(())
}
