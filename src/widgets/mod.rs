//! Interactive UI elements owned by screens.
//!
//! This module organizes the visual components into submodules:
//!
//! - [`slider`]: Drag-to-set horizontal slider with a value in `[0, 1]`
//! - [`toggle`]: Click-to-flip checkbox
//! - [`text`]: Static label rendered once into a cached bitmap
//! - [`primitives`]: Shared low-level drawing helpers
//!
//! # Widget Contract
//!
//! Every widget implements [`Widget`]:
//!
//! 1. `update(events, dt)` consumes the whole frame's event batch and changes
//!    logical state only. It never draws.
//! 2. `render(surface)` draws the current state and changes nothing.
//! 3. `rescale()` rebuilds cached pixel data after the owning screen has
//!    written a new rectangle with [`Widget::set_rect`]. Calling it twice with
//!    the same rectangle gives the same result as calling it once.
//!
//! No widget knows the window size. Geometry is always injected by the
//! owning screen during its own rescale.
//!
//! # Zero-Sized Rectangles
//!
//! Widgets start at [`Rect::ZERO`] and may pass through empty rectangles
//! during a resize. Hit-testing and drawing are skipped for that frame;
//! releasing a grabbed slider still works.

mod primitives;
mod slider;
mod text;
mod toggle;

use std::time::Duration;

pub use primitives::{draw_polyline, fill_rect};
pub use slider::Slider;
pub use text::{HorizontalAlign, Text};
pub use toggle::Toggle;

use crate::bitmap::Surface;
use crate::geometry::Rect;
use crate::input::InputEvent;

/// Common interface every screen-owned element implements.
pub trait Widget {
    /// Current position and size in window pixels.
    fn rect(&self) -> Rect;

    /// Move or resize the widget. Takes effect visually after [`Widget::rescale`].
    fn set_rect(
        &mut self,
        rect: Rect,
    );

    /// Hidden widgets are still updated but not rendered.
    fn is_visible(&self) -> bool { true }

    /// Advance logical state from the frame's events.
    fn update(
        &mut self,
        events: &[InputEvent],
        dt: Duration,
    );

    /// Draw the current state onto the surface.
    fn render(
        &self,
        surface: &mut Surface,
    );

    /// Rebuild cached pixel-space data for the current rectangle.
    fn rescale(&mut self);
}
