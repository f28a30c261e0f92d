//! Static text and primitive styles shared by widgets and the plot renderer.
//!
//! Styles whose color never changes are `const` so no draw call rebuilds them.
//! Label text picks its font at rescale time, so it builds a
//! `MonoTextStyle` from [`FONT_LADDER`] instead of using a constant.
//!
//! # Font Ladder
//!
//! [`FONT_LADDER`] lists the available mono fonts from smallest to largest.
//! [`Text`](crate::widgets::Text) walks it to find the biggest font that fits
//! its rectangle; it is also registered in the
//! [`AssetStore`](crate::assets::AssetStore) under the `label` key.

use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        ascii::{FONT_5X8, FONT_6X10, FONT_7X13, FONT_8X13, FONT_9X15, FONT_10X20},
    },
    pixelcolor::Rgb888,
    primitives::{PrimitiveStyle, PrimitiveStyleBuilder, StrokeAlignment},
    text::{Alignment, Baseline, TextStyle, TextStyleBuilder},
};
use profont::{PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

use crate::colors::{BLACK, GRAY, LIGHT_GRAY};

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Top-left anchored text. Label bitmaps are rendered from their own origin.
pub const TOP_LEFT: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Top)
    .build();

/// Horizontally centered, vertically middle. Used for axis tick labels.
pub const CENTERED_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Middle)
    .build();

/// Right aligned, vertically middle. Used for y-axis tick labels.
pub const RIGHT_MIDDLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Right)
    .baseline(Baseline::Middle)
    .build();

/// Left aligned, bottom baseline. Used for the statistics line above the axes.
pub const LEFT_BOTTOM: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Left)
    .baseline(Baseline::Bottom)
    .build();

// =============================================================================
// Fonts
// =============================================================================

/// Mono fonts ordered by glyph height, smallest first.
pub const FONT_LADDER: &[&MonoFont<'static>] = &[
    &FONT_5X8,
    &FONT_6X10,
    &FONT_7X13,
    &FONT_8X13,
    &FONT_9X15,
    &PROFONT_12_POINT,
    &PROFONT_14_POINT,
    &FONT_10X20,
    &PROFONT_18_POINT,
    &PROFONT_24_POINT,
];

/// Figure text (ticks, axis labels, statistics).
pub const PLOT_TEXT_STYLE: MonoTextStyle<'static, Rgb888> = MonoTextStyle::new(&FONT_6X10, BLACK);

// =============================================================================
// Primitive Styles
// =============================================================================

/// Axes frame and tick marks.
pub const AXIS_STROKE: PrimitiveStyle<Rgb888> = PrimitiveStyle::with_stroke(BLACK, 1);

/// Slider track line.
pub const TRACK_STROKE: PrimitiveStyle<Rgb888> = PrimitiveStyle::with_stroke(GRAY, 3);

/// Slider track background.
pub const TRACK_FILL: PrimitiveStyle<Rgb888> = PrimitiveStyle::with_fill(LIGHT_GRAY);

/// Toggle box border, kept inside the toggle rectangle.
pub const TOGGLE_BORDER: PrimitiveStyle<Rgb888> = PrimitiveStyleBuilder::new()
    .stroke_color(BLACK)
    .stroke_width(2)
    .stroke_alignment(StrokeAlignment::Inside)
    .build();
