//! Checkbox that flips on a completed click.
//!
//! A click only counts when both the press and the release land inside the
//! box. Pressing inside and releasing outside (or dragging in from outside)
//! leaves the state alone.

use std::time::Duration;

use super::Widget;
use super::primitives::draw_box;
use crate::bitmap::Surface;
use crate::colors::ACCENT;
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::styles::TOGGLE_BORDER;

/// Boolean checkbox widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toggle {
    rect: Rect,
    ticked: bool,
    /// A primary press started inside the box and has not been released yet.
    armed: bool,
    /// Gap between border and fill. Rebuilt by `rescale`.
    padding: i32,
}

impl Toggle {
    pub const fn new(ticked: bool) -> Self {
        Self {
            rect: Rect::ZERO,
            ticked,
            armed: false,
            padding: 0,
        }
    }

    #[inline]
    pub const fn is_ticked(&self) -> bool { self.ticked }
}

impl Widget for Toggle {
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
            if let Some(position) = event.primary_down() {
                self.armed = !self.rect.is_empty() && self.rect.contains(position);
            } else if let Some(position) = event.primary_up() {
                if self.armed && self.rect.contains(position) {
                    self.ticked = !self.ticked;
                }
                self.armed = false;
            }
        }
    }

    fn render(
        &self,
        surface: &mut Surface,
    ) {
        let fill = self.ticked.then_some(ACCENT);
        draw_box(surface, self.rect, TOGGLE_BORDER, fill, self.padding);
    }

    fn rescale(&mut self) { self.padding = (self.rect.width.min(self.rect.height) / 5).max(2); }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;

    use super::*;
    use crate::input::PointerButton;

    const DT: Duration = Duration::from_millis(16);

    fn toggle() -> Toggle {
        let mut toggle = Toggle::new(false);
        toggle.set_rect(Rect::new(10, 10, 20, 20));
        toggle.rescale();
        toggle
    }

    fn press(
        x: i32,
        y: i32,
    ) -> InputEvent {
        InputEvent::PointerDown {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    fn release(
        x: i32,
        y: i32,
    ) -> InputEvent {
        InputEvent::PointerUp {
            position: Point::new(x, y),
            button: PointerButton::Primary,
        }
    }

    #[test]
    fn test_click_inside_flips_once() {
        let mut toggle = toggle();
        toggle.update(&[press(15, 15), release(20, 20)], DT);
        assert!(toggle.is_ticked());
        toggle.update(&[release(20, 20)], DT);
        assert!(toggle.is_ticked(), "Stray release must not flip again");
    }

    #[test]
    fn test_click_split_across_frames() {
        let mut toggle = toggle();
        toggle.update(&[press(15, 15)], DT);
        assert!(!toggle.is_ticked(), "Press alone does not flip");
        toggle.update(&[release(16, 16)], DT);
        assert!(toggle.is_ticked());
    }

    #[test]
    fn test_release_outside_does_not_flip() {
        let mut toggle = toggle();
        toggle.update(&[press(15, 15), release(100, 100)], DT);
        assert!(!toggle.is_ticked());
    }

    #[test]
    fn test_press_outside_release_inside_does_not_flip() {
        let mut toggle = toggle();
        toggle.update(&[press(100, 100), release(15, 15)], DT);
        assert!(!toggle.is_ticked());
    }

    #[test]
    fn test_two_clicks_restore_state() {
        let mut toggle = toggle();
        toggle.update(&[press(15, 15), release(15, 15), press(15, 15), release(15, 15)], DT);
        assert!(!toggle.is_ticked());
    }

    #[test]
    fn test_rescale_is_idempotent() {
        let once = toggle();
        let mut twice = once.clone();
        twice.rescale();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_render_fills_when_ticked() {
        let mut surface = Surface::new(Size::new(40, 40));
        let mut toggle = toggle();
        toggle.render(&mut surface);
        assert_ne!(surface.get_pixel(Point::new(20, 20)), ACCENT);

        toggle.ticked = true;
        toggle.render(&mut surface);
        assert_eq!(surface.get_pixel(Point::new(20, 20)), ACCENT);
    }
}
