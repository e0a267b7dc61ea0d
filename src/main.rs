//! Keystone: push stones, collect keys, open locks. A Boulder Dash-style puzzle in the terminal.

mod app;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use keystone::level::Level;
use keystone::theme::Theme;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Options derived from CLI that affect the game loop.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub tick_interval: Duration,
    pub start_paused: bool,
}

impl GameConfig {
    pub fn from_args(args: &Args) -> Self {
        let rate = if args.tick_rate.is_finite() {
            args.tick_rate.max(1.0)
        } else {
            DEFAULT_TICK_RATE
        };
        Self {
            tick_interval: Duration::from_secs_f64(1.0 / rate),
            start_paused: args.paused,
        }
    }
}

const DEFAULT_TICK_RATE: f64 = 30.0;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    let theme = match Theme::load(args.theme.as_deref()) {
        Ok(theme) => theme,
        Err(err) => {
            warn!(error = %err, "theme_load_failed");
            Theme::default()
        }
    };
    let level = Level::sample().context("built-in level is invalid")?;
    let config = GameConfig::from_args(&args);
    info!(
        width = level.width(),
        height = level.height(),
        tick_interval_ms = config.tick_interval.as_millis() as u64,
        "startup"
    );

    let mut app = App::new(config, theme, level);
    let result = app.run();
    info!("shutdown");
    result
}

/// Logs go to a file only; the terminal belongs to the game.
fn init_tracing(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .compact()
        .init();
    Ok(())
}

/// Push stones and boxes, pick up keys to open locks, and mind what falls.
#[derive(Debug, Parser)]
#[command(
    name = "keystone",
    version,
    about = "Boulder Dash-style push, key and gravity puzzle in the terminal.",
    long_about = "Keystone is a single-screen tile puzzle. Walk over flux, push resting stones and \
        boxes onto solid ground, and collect keys: each key opens every lock of its colour. \
        Anything left over air falls one cell per tick.\n\n\
        CONTROLS:\n  Arrows / WASD  Move or push    P  Pause    R  Restart    Q / Esc  Quit"
)]
pub struct Args {
    /// Simulation ticks per second (input is resolved and gravity applied once per tick).
    #[arg(long, default_value_t = DEFAULT_TICK_RATE, value_name = "RATE")]
    pub tick_rate: f64,

    /// Path to theme file (btop-style theme[key]="#rrggbb"; keys: flux, wall, stone, box, key1, key2, player, main_bg).
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Start with the game paused.
    #[arg(long)]
    pub paused: bool,
}
