//! Color palette for the visualizer.
//!
//! The UI chrome is black on white. Plot series use the classic plotting
//! cycle (`C0`, `C1`, `C2`) so the figure reads like a familiar chart.

use embedded_graphics::pixelcolor::Rgb888;

// =============================================================================
// UI Colors
// =============================================================================

pub const WHITE: Rgb888 = Rgb888::new(255, 255, 255);
pub const BLACK: Rgb888 = Rgb888::new(0, 0, 0);

/// Slider track and unticked toggle border.
pub const GRAY: Rgb888 = Rgb888::new(0x80, 0x80, 0x80);

/// Light fill behind the slider track.
pub const LIGHT_GRAY: Rgb888 = Rgb888::new(0xD9, 0xD9, 0xD9);

/// Slider handle while grabbed, ticked toggle fill.
pub const ACCENT: Rgb888 = Rgb888::new(0x00, 0x50, 0xEF);

/// Slider handle at rest.
pub const HANDLE: Rgb888 = Rgb888::new(0x40, 0x40, 0x40);

// =============================================================================
// Plot Series Colors
// =============================================================================

/// Bar chart fill (`C0`).
pub const SERIES_BARS: Rgb888 = Rgb888::new(0x1F, 0x77, 0xB4);

/// Frequency polygon stroke (`C1`).
pub const SERIES_POLYGON: Rgb888 = Rgb888::new(0xFF, 0x7F, 0x0E);

/// Expected normal curve stroke (`C2`).
pub const SERIES_NORMAL: Rgb888 = Rgb888::new(0x2C, 0xA0, 0x2C);
