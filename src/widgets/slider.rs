//! Horizontal drag slider.
//!
//! # State Machine
//!
//! ```text
//!            press on handle
//!   idle  ───────────────────▶  grabbed
//!     ▲                            │ pointer move: value = projection of x
//!     └──────── release ───────────┘ (anywhere, any position)
//! ```
//!
//! The handle is a square as tall as the slider. The track is inset by half
//! a handle on both sides so the handle never leaves the slider rectangle;
//! the value is the pointer's linear position between the track's own left
//! and right pixels, clamped to `[0, 1]`.

use std::time::Duration;

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Line;

use super::Widget;
use super::primitives::draw_box;
use crate::bitmap::Surface;
use crate::colors::{ACCENT, HANDLE};
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::styles::{TOGGLE_BORDER, TRACK_FILL, TRACK_STROKE};

/// Drag-to-set slider with a value in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    rect: Rect,
    value: f32,
    grabbed: bool,
    /// Pixel span the handle center moves along. Rebuilt by `rescale`.
    track: Rect,
}

impl Slider {
    /// Create a slider at `value` (clamped). Geometry arrives with the first rescale.
    pub fn new(value: f32) -> Self {
        Self {
            rect: Rect::ZERO,
            value: clamp_unit(value),
            grabbed: false,
            track: Rect::ZERO,
        }
    }

    #[inline]
    pub const fn value(&self) -> f32 { self.value }

    /// Whether the pointer is currently holding the handle.
    #[inline]
    pub const fn is_grabbed(&self) -> bool { self.grabbed }

    /// Track span the value is projected onto.
    #[inline]
    pub const fn track(&self) -> Rect { self.track }

    /// Hit-box of the handle at the current value.
    pub fn handle_rect(&self) -> Rect {
        let side = self.rect.height;
        let mut handle = Rect::new(0, 0, side, side);
        let center_x = self.track.left() + (self.value * self.track.width as f32).round() as i32;
        handle.set_center(Point::new(center_x, self.rect.center_y()));
        handle
    }

    /// Project a pointer x coordinate onto the track.
    fn project(
        &self,
        x: i32,
    ) -> Option<f32> {
        if self.track.width <= 0 {
            return None;
        }
        Some(clamp_unit((x - self.track.left()) as f32 / self.track.width as f32))
    }
}

impl Default for Slider {
    fn default() -> Self { Self::new(0.0) }
}

impl Widget for Slider {
    fn rect(&self) -> Rect { self.rect }

    fn set_rect(
        &mut self,
        rect: Rect,
    ) {
        self.rect = rect;
    }

    fn update(
        &mut self,
        events: &[InputEvent],
        _dt: Duration,
    ) {
        for event in events {
            if event.primary_up().is_some() {
                self.grabbed = false;
                continue;
            }
            if self.rect.is_empty() {
                continue;
            }
            if let Some(position) = event.primary_down() {
                if self.handle_rect().contains(position) {
                    self.grabbed = true;
                }
            } else if let Some(position) = event.pointer_move()
                && self.grabbed
                && let Some(value) = self.project(position.x)
            {
                self.value = value;
            }
        }
    }

    fn render(
        &self,
        surface: &mut Surface,
    ) {
        if self.rect.is_empty() {
            return;
        }
        let y = self.rect.center_y();
        let groove = Rect::new(self.track.left(), y - 2, self.track.width, 5);
        groove.to_rectangle().into_styled(TRACK_FILL).draw(surface).ok();
        Line::new(Point::new(self.track.left(), y), Point::new(self.track.right(), y))
            .into_styled(TRACK_STROKE)
            .draw(surface)
            .ok();

        let color = if self.grabbed { ACCENT } else { HANDLE };
        draw_box(surface, self.handle_rect(), TOGGLE_BORDER, Some(color), 0);
    }

    fn rescale(&mut self) {
        let half = self.rect.height / 2;
        self.track = Rect::new(self.rect.left() + half, self.rect.center_y(), self.rect.width - 2 * half, 0);
    }
}

#[inline]
fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::PointerButton;

    const DT: Duration = Duration::from_millis(16);

    fn slider_at(value: f32) -> Slider {
        let mut slider = Slider::new(value);
        slider.set_rect(Rect::new(100, 50, 220, 20));
        slider.rescale();
        slider
    }

    fn down(x: i32, y: i32) -> InputEvent {
        InputEvent::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn up(x: i32, y: i32) -> InputEvent {
        InputEvent::PointerUp {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn drag(x: i32, y: i32) -> InputEvent { InputEvent::PointerMove { position: Point::new(x, y) } }

    #[test]
    fn test_new_clamps_value() {
        assert_eq!(Slider::new(1.7).value(), 1.0);
        assert_eq!(Slider::new(-3.0).value(), 0.0);
        assert_eq!(Slider::new(f32::NAN).value(), 0.0);
    }

    #[test]
    fn test_track_is_inset_by_half_handle() {
        let slider = slider_at(0.5);
        assert_eq!(slider.track().left(), 110);
        assert_eq!(slider.track().right(), 310);
        assert_eq!(slider.handle_rect().center(), Point::new(210, 60));
    }

    #[test]
    fn test_grab_drag_release() {
        let mut slider = slider_at(0.5);
        slider.update(&[down(210, 60)], DT);
        assert!(slider.is_grabbed());

        slider.update(&[drag(160, 80)], DT);
        assert!((slider.value() - 0.25).abs() < 1e-6, "Vertical offset does not matter while grabbed");

        slider.update(&[up(500, 500)], DT);
        assert!(!slider.is_grabbed(), "Release anywhere ends the grab");
        slider.update(&[drag(300, 60)], DT);
        assert!((slider.value() - 0.25).abs() < 1e-6, "Moves after release are ignored");
    }

    #[test]
    fn test_drag_clamps_to_track() {
        let mut slider = slider_at(0.5);
        slider.update(&[down(210, 60), drag(-1000, 60)], DT);
        assert_eq!(slider.value(), 0.0);
        slider.update(&[drag(5000, 60)], DT);
        assert_eq!(slider.value(), 1.0);
    }

    #[test]
    fn test_press_off_handle_does_not_grab() {
        let mut slider = slider_at(0.5);
        slider.update(&[down(120, 60), drag(300, 60)], DT);
        assert!(!slider.is_grabbed());
        assert_eq!(slider.value(), 0.5);
    }

    #[test]
    fn test_secondary_button_is_ignored() {
        let mut slider = slider_at(0.5);
        let press = InputEvent::PointerDown {
            position: Point::new(210, 60),
            button: PointerButton::Secondary,
        };
        slider.update(&[press], DT);
        assert!(!slider.is_grabbed());
    }

    #[test]
    fn test_release_works_with_empty_rect() {
        let mut slider = slider_at(0.5);
        slider.update(&[down(210, 60)], DT);
        slider.set_rect(Rect::ZERO);
        slider.rescale();
        slider.update(&[drag(300, 60), up(300, 60)], DT);
        assert!(!slider.is_grabbed());
        assert_eq!(slider.value(), 0.5, "Zero-sized slider ignores drags");
    }

    #[test]
    fn test_rescale_is_idempotent() {
        let once = slider_at(0.3);
        let mut twice = once.clone();
        twice.rescale();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_render_draws_handle() {
        let slider = slider_at(0.0);
        let mut surface = Surface::new(Size::new(400, 100));
        slider.render(&mut surface);
        assert_eq!(surface.get_pixel(Point::new(110, 60)), HANDLE);
    }
}
