//! Per-frame input event batch.
//!
//! The application drains the simulator window once per frame and converts
//! each `SimulatorEvent` into an [`InputEvent`]. The whole batch is handed to
//! the active screen, which passes the same slice to every widget: widgets
//! interpret the batch independently and nothing consumes an event.
//!
//! Keeping widgets on this small enum (instead of raw SDL events) lets them be
//! driven from tests without a window.

use embedded_graphics::prelude::Point;
use embedded_graphics_simulator::SimulatorEvent;
use embedded_graphics_simulator::sdl2::{Keycode, MouseButton};

/// Which pointer button an event refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    /// Left mouse button. The only button widgets react to.
    Primary,
    Secondary,
    Middle,
    Other,
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => Self::Primary,
            MouseButton::Right => Self::Secondary,
            MouseButton::Middle => Self::Middle,
            _ => Self::Other,
        }
    }
}

/// Keys the application loop reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Cycle through the configured resolution presets.
    CycleResolution,
}

/// A discrete input event delivered to the active screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close request.
    Quit,
    PointerDown { position: Point, button: PointerButton },
    PointerUp { position: Point, button: PointerButton },
    PointerMove { position: Point },
    KeyDown { key: Key },
}

impl InputEvent {
    /// Translate a simulator event; events with no meaning here yield `None`.
    ///
    /// OS key repeat is dropped so holding a key does not cycle repeatedly.
    pub fn from_simulator(event: SimulatorEvent) -> Option<Self> {
        match event {
            SimulatorEvent::Quit => Some(Self::Quit),
            SimulatorEvent::MouseButtonDown { mouse_btn, point } => Some(Self::PointerDown {
                position: point,
                button: mouse_btn.into(),
            }),
            SimulatorEvent::MouseButtonUp { mouse_btn, point } => Some(Self::PointerUp {
                position: point,
                button: mouse_btn.into(),
            }),
            SimulatorEvent::MouseMove { point } => Some(Self::PointerMove { position: point }),
            SimulatorEvent::KeyDown { keycode, repeat, .. } if !repeat => match keycode {
                Keycode::Tab => Some(Self::KeyDown { key: Key::CycleResolution }),
                _ => None,
            },
            _ => None,
        }
    }

    /// Position of a primary-button press, if this is one.
    #[inline]
    pub const fn primary_down(&self) -> Option<Point> {
        match *self {
            Self::PointerDown {
                position,
                button: PointerButton::Primary,
            } => Some(position),
            _ => None,
        }
    }

    /// Position of a primary-button release, if this is one.
    #[inline]
    pub const fn primary_up(&self) -> Option<Point> {
        match *self {
            Self::PointerUp {
                position,
                button: PointerButton::Primary,
            } => Some(position),
            _ => None,
        }
    }

    /// Pointer position for a move event.
    #[inline]
    pub const fn pointer_move(&self) -> Option<Point> {
        match *self {
            Self::PointerMove { position } => Some(position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_down_only_matches_left_button() {
        let left = InputEvent::PointerDown {
            position: Point::new(3, 4),
            button: PointerButton::Primary,
        };
        let right = InputEvent::PointerDown {
            position: Point::new(3, 4),
            button: PointerButton::Secondary,
        };
        assert_eq!(left.primary_down(), Some(Point::new(3, 4)));
        assert_eq!(right.primary_down(), None, "Secondary button must be ignored");
        assert_eq!(left.primary_up(), None);
    }

    #[test]
    fn test_simulator_mouse_translation() {
        let event = InputEvent::from_simulator(SimulatorEvent::MouseButtonUp {
            mouse_btn: MouseButton::Left,
            point: Point::new(10, 20),
        });
        assert_eq!(event.and_then(|e| e.primary_up()), Some(Point::new(10, 20)));

        let moved = InputEvent::from_simulator(SimulatorEvent::MouseMove { point: Point::new(1, 2) });
        assert_eq!(moved, Some(InputEvent::PointerMove { position: Point::new(1, 2) }));
    }

    #[test]
    fn test_simulator_quit_translation() {
        assert_eq!(InputEvent::from_simulator(SimulatorEvent::Quit), Some(InputEvent::Quit));
    }
}
