// Crate-level lints: allow the numeric casts pixel math and plotting rely on
#![allow(clippy::cast_possible_truncation)] // f64->i32 and f32->u32 casts for pixel coordinates
#![allow(clippy::cast_precision_loss)] // usize/u32->f64 for statistics and axis mapping
#![allow(clippy::cast_possible_wrap)] // u32->i32 for window sizes well below i32::MAX
#![allow(clippy::cast_sign_loss)] // f64->usize after clamping to a non-negative range
#![allow(clippy::struct_excessive_bools)] // WidgetSnapshot mirrors three toggles and two grab states
#![allow(clippy::similar_names)] // x_min/y_min style pairs in plotting code

//! Interactive Central Limit Theorem visualizer.
//!
//! Loads a two-column dataset (label, value) from a spreadsheet or text file,
//! treats the values as a population, and plots the distribution of sample
//! means drawn from it.
//! Two sliders pick the sample size (1 to 100) and the number of samples
//! (1 to 15 000); three toggles choose which series are drawn:
//!
//! - a histogram of the sample means
//! - a frequency polygon through the bar tops
//! - the normal density the Central Limit Theorem predicts
//!
//! # Controls
//!
//! | Input | Effect |
//! |-------|--------|
//! | Drag a slider | Updates its label; the plot refreshes on release |
//! | Click a toggle | Shows or hides a series and refreshes the plot |
//! | `Tab` | Next window resolution preset (saved to the config file) |
//! | Close window | Exit |
//!
//! # Configuration
//!
//! Settings live in `<config dir>/clt-visualizer/config.toml` unless
//! `--config` names another file. A missing file means defaults; an invalid
//! one is reported and ignored. Log verbosity follows `RUST_LOG`.
//!
//! # Modules
//!
//! - [`app`]: window, frame loop and resolution cycling
//! - [`screens`]: screen stack and the main screen
//! - [`widgets`]: slider, toggle and text label
//! - [`sampling`] / [`plot`]: resampling and figure rasterization
//! - [`render`]: change detection deciding when to replot
//! - [`dataset`], [`config`], [`assets`], [`error`]

mod app;
mod assets;
mod bitmap;
mod colors;
mod config;
mod dataset;
mod error;
mod geometry;
mod input;
mod plot;
mod profiling;
mod render;
mod sampling;
mod screens;
mod styles;
mod widgets;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use app::{Application, ConfigStore};
use assets::AssetStore;
use clap::Parser as ClapParser;
use config::AppConfig;
use dataset::Dataset;
use error::AppError;
use rand::SeedableRng;
use rand::rngs::StdRng;
use screens::MainScreen;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "clt-visualizer", about = "Plot the sampling distribution of the mean for a dataset")]
struct Cli {
    /// Path to the config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Dataset to sample from, overriding the config file
    #[arg(short, long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Run without the frame rate limiter
    #[arg(long)]
    no_vsync: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let (config, store) = load_config(&cli);

    match run(config, store) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "startup failed");
            eprintln!("\nError: {err}\nPress Enter to exit.");
            let mut line = String::new();
            io::stdin().read_line(&mut line).ok();
            ExitCode::FAILURE
        }
    }
}

/// Effective settings plus the store runtime changes are saved to.
///
/// Config problems are never fatal: they are logged and defaults are used.
fn load_config(cli: &Cli) -> (AppConfig, Option<ConfigStore>) {
    let path = match cli.config.clone() {
        Some(path) => Some(path),
        None => AppConfig::default_path()
            .map_err(|err| warn!(%err, "config will not be saved"))
            .ok(),
    };

    let stored = match &path {
        Some(path) => AppConfig::load(path).unwrap_or_else(|err| {
            warn!(%err, "using default config");
            AppConfig::default()
        }),
        None => AppConfig::default(),
    };

    let mut config = stored.clone();
    if let Some(data) = &cli.data {
        config.dataset_path.clone_from(data);
    }
    if cli.no_vsync {
        config.vsync = false;
    }
    (config, path.map(|path| ConfigStore::new(path, stored)))
}

fn run(
    config: AppConfig,
    store: Option<ConfigStore>,
) -> Result<(), AppError> {
    // Before the window opens, so a bad dataset never flashes an empty window.
    let dataset = Dataset::load(&config.dataset_path)?;

    let assets = AssetStore::with_builtins();
    let mut app = Application::new(config, store);
    let screen = MainScreen::new(dataset, &assets, app.size(), StdRng::from_entropy())?;
    app.push(Box::new(screen));
    app.run();
    Ok(())
}
