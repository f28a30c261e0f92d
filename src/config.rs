//! Application configuration: compile-time constants and the persisted config file.
//!
//! # Constants
//!
//! Frame timing, slider-to-parameter mappings and the main screen grid live
//! here as `const` values so the layout arithmetic reads as fractions of the
//! window instead of magic numbers scattered through the screen code.
//!
//! # Config File
//!
//! [`AppConfig`] is a plain TOML file:
//!
//! ```toml
//! resolution = [800, 600]
//! resolution_presets = [[800, 600], [1024, 768], [1600, 1200]]
//! vsync = true
//! dataset_path = "data.xlsx"
//! window_title = "Normal Sampling Distribution"
//! ```
//!
//! It is read once at startup. The only runtime write is the chosen
//! resolution after the user cycles presets.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time when vsync is enabled (~60 FPS).
pub const FRAME_TIME: Duration = Duration::from_micros(16_667);

/// How often the frame statistics summary is logged.
pub const STATS_LOG_INTERVAL: Duration = Duration::from_secs(5);

// =============================================================================
// Sampling Parameter Mapping
// =============================================================================

/// Smallest sample size the size slider can select.
pub const MIN_SAMPLE_SIZE: usize = 1;

/// Largest sample size the size slider can select.
pub const MAX_SAMPLE_SIZE: usize = 100;

/// Smallest number of samples the count slider can select.
pub const MIN_SAMPLE_COUNT: usize = 1;

/// Largest number of samples the count slider can select.
pub const MAX_SAMPLE_COUNT: usize = 15_000;

/// Initial slider position for both sliders.
pub const INITIAL_SLIDER_VALUE: f32 = 0.5;

/// Sample size used to fix the y-axis ceiling (peak of the narrowest curve).
pub const Y_LIMIT_SAMPLE_SIZE: f64 = 100.0;

/// Bar width of the histogram, in data units.
pub const BAR_WIDTH: f64 = 0.05;

// =============================================================================
// Main Screen Grid
// =============================================================================

// Layout arithmetic is integer: `size * numerator / denominator`, so the
// grid lines land on the same pixels at every resolution.

/// Rows are 24ths of the window height.
pub const GRID_ROWS: i32 = 24;

/// Columns are 12ths of the window width.
pub const GRID_COLS: i32 = 12;

/// Horizontal band edges in 24ths of the height (r1, r4, r2, r5, r3).
pub const ROW_TOP: i32 = 18;
pub const ROW_TOGGLE_1: i32 = 20;
pub const ROW_MIDDLE: i32 = 21;
pub const ROW_TOGGLE_2: i32 = 22;
pub const ROW_BOTTOM: i32 = 24;

/// Vertical column edges in 12ths of the width (c1..c5).
pub const COL_LABELS: i32 = 0;
pub const COL_SLIDERS: i32 = 3;
pub const COL_TOGGLE_LABELS: i32 = 8;
pub const COL_TOGGLES: i32 = 11;
pub const COL_RIGHT: i32 = 12;

/// Figure height as a fraction of the window height.
pub const FIGURE_HEIGHT: f32 = 3.0 / 4.0;

/// Figure center y as a fraction of the window height (middle of the upper 3/4).
pub const FIGURE_CENTER_Y: f32 = 3.0 / 8.0;

/// Figure aspect ratio (width / height).
pub const FIGURE_ASPECT: f32 = 4.0 / 3.0;

/// Footer credit label: height / 36 tall, width / 6 wide.
pub const FOOTER_HEIGHT_DIVISOR: i32 = 36;
pub const FOOTER_WIDTH_DIVISOR: i32 = 6;

/// Icon badge: side height / 24, inset height / 96 from the top-right corner.
pub const BADGE_SIZE_DIVISOR: i32 = 24;
pub const BADGE_INSET_DIVISOR: i32 = 96;

// =============================================================================
// Persisted Configuration
// =============================================================================

/// Runtime settings loaded from `config.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window size in pixels.
    pub resolution: [u32; 2],
    /// Sizes cycled by the resolution key.
    pub resolution_presets: Vec<[u32; 2]>,
    /// Limit the loop to ~60 FPS.
    pub vsync: bool,
    /// Two-column dataset (label, value).
    pub dataset_path: PathBuf,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resolution: [800, 600],
            resolution_presets: vec![[800, 600], [1024, 768], [1600, 1200]],
            vsync: true,
            dataset_path: PathBuf::from("data.xlsx"),
            window_title: "Normal Sampling Distribution".to_owned(),
        }
    }
}

impl AppConfig {
    /// Default location: `<config dir>/clt-visualizer/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("clt-visualizer").join("config.toml"))
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Write to `path`, creating the parent directory if needed.
    pub fn save(
        &self,
        path: &Path,
    ) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// The preset after the current resolution, wrapping around.
    ///
    /// A resolution that is not one of the presets moves to the first preset.
    pub fn next_resolution(&self) -> Option<[u32; 2]> {
        if self.resolution_presets.is_empty() {
            return None;
        }
        let next = self
            .resolution_presets
            .iter()
            .position(|r| *r == self.resolution)
            .map_or(0, |i| (i + 1) % self.resolution_presets.len());
        Some(self.resolution_presets[next])
    }
}
