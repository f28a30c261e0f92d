//! Screens and the screen stack.
//!
//! # Composition
//!
//! A [`Screen`] owns its widgets and an optional background image. Every
//! frame it hands the full event batch to every widget (nothing consumes an
//! event), blits the pre-scaled background and renders visible widgets in a
//! fixed order: texts, sliders, toggles.
//!
//! Concrete screens embed a [`Screen`] and implement [`Scene`]. They keep
//! typed ids ([`SliderId`], [`ToggleId`], [`TextId`]) to read their own
//! widgets back, and inject widget geometry before delegating to
//! [`Screen::rescale`].
//!
//! # Stack
//!
//! The application owns a [`ScreenStack`]. Only the top screen is ticked;
//! every screen on the stack is rescaled when the window size changes.
//!
//! - **Main Screen** ([`main_screen`]): the sampling distribution visualizer

mod main_screen;

use std::time::Duration;

use embedded_graphics::prelude::{Point, Size};
use tracing::debug;

pub use main_screen::MainScreen;

use crate::bitmap::{Bitmap, Surface};
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::widgets::{Slider, Text, Toggle, Widget};

/// A screen the application loop can run.
pub trait Scene {
    /// Advance one frame and draw it onto `surface`.
    fn tick(
        &mut self,
        events: &[InputEvent],
        dt: Duration,
        surface: &mut Surface,
    );

    /// Recompute layout and cached images for a new window size.
    fn rescale(
        &mut self,
        size: Size,
    );

    /// Plot refreshes performed since the last call. Screens without a plot report zero.
    fn take_refresh_count(&mut self) -> u32 { 0 }
}

/// Handle to a slider owned by a [`Screen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderId(usize);

/// Handle to a toggle owned by a [`Screen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToggleId(usize);

/// Handle to a text label owned by a [`Screen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextId(usize);

/// Widget collection plus background, shared by every concrete screen.
#[derive(Default)]
pub struct Screen {
    size: Size,
    background: Option<Bitmap>,
    /// Background scaled to cover the window, and where it goes.
    scaled_background: Option<(Bitmap, Rect)>,
    texts: Vec<Text>,
    sliders: Vec<Slider>,
    toggles: Vec<Toggle>,
}

impl Screen {
    pub fn new() -> Self { Self::default() }

    /// Window size seen by the last rescale.
    #[inline]
    pub const fn size(&self) -> Size { self.size }

    /// Set or clear the background. Takes effect on the next rescale.
    #[allow(dead_code)] // The main screen paints its own white backdrop
    pub fn set_background(
        &mut self,
        background: Option<Bitmap>,
    ) {
        self.background = background;
        self.scaled_background = None;
    }

    pub fn add_slider(
        &mut self,
        slider: Slider,
    ) -> SliderId {
        self.sliders.push(slider);
        SliderId(self.sliders.len() - 1)
    }

    pub fn add_toggle(
        &mut self,
        toggle: Toggle,
    ) -> ToggleId {
        self.toggles.push(toggle);
        ToggleId(self.toggles.len() - 1)
    }

    pub fn add_text(
        &mut self,
        text: Text,
    ) -> TextId {
        self.texts.push(text);
        TextId(self.texts.len() - 1)
    }

    #[inline]
    pub fn slider(
        &self,
        id: SliderId,
    ) -> &Slider {
        &self.sliders[id.0]
    }

    #[inline]
    pub fn slider_mut(
        &mut self,
        id: SliderId,
    ) -> &mut Slider {
        &mut self.sliders[id.0]
    }

    #[inline]
    pub fn toggle(
        &self,
        id: ToggleId,
    ) -> &Toggle {
        &self.toggles[id.0]
    }

    #[inline]
    pub fn toggle_mut(
        &mut self,
        id: ToggleId,
    ) -> &mut Toggle {
        &mut self.toggles[id.0]
    }

    #[inline]
    pub fn text(
        &self,
        id: TextId,
    ) -> &Text {
        &self.texts[id.0]
    }

    #[inline]
    pub fn text_mut(
        &mut self,
        id: TextId,
    ) -> &mut Text {
        &mut self.texts[id.0]
    }

    /// Every widget in render order.
    fn widgets(&self) -> impl Iterator<Item = &dyn Widget> {
        let texts = self.texts.iter().map(|w| w as &dyn Widget);
        let sliders = self.sliders.iter().map(|w| w as &dyn Widget);
        let toggles = self.toggles.iter().map(|w| w as &dyn Widget);
        texts.chain(sliders).chain(toggles)
    }

    fn widgets_mut(&mut self) -> impl Iterator<Item = &mut dyn Widget> {
        let texts = self.texts.iter_mut().map(|w| w as &mut dyn Widget);
        let sliders = self.sliders.iter_mut().map(|w| w as &mut dyn Widget);
        let toggles = self.toggles.iter_mut().map(|w| w as &mut dyn Widget);
        texts.chain(sliders).chain(toggles)
    }

    /// Give every widget the full event batch.
    pub fn update(
        &mut self,
        events: &[InputEvent],
        dt: Duration,
    ) {
        for widget in self.widgets_mut() {
            widget.update(events, dt);
        }
    }

    /// Blit the background, then every visible widget.
    pub fn render(
        &self,
        surface: &mut Surface,
    ) {
        if let Some((image, rect)) = &self.scaled_background {
            image.blit(surface, Point::new(rect.x, rect.y)).ok();
        }
        for widget in self.widgets().filter(|w| w.is_visible()) {
            widget.render(surface);
        }
    }

    /// Update then render.
    pub fn tick(
        &mut self,
        events: &[InputEvent],
        dt: Duration,
        surface: &mut Surface,
    ) {
        self.update(events, dt);
        self.render(surface);
    }

    /// Scale the background to cover `size`, then rescale every widget.
    ///
    /// Widget rectangles must already be set by the owning screen.
    pub fn rescale(
        &mut self,
        size: Size,
    ) {
        self.size = size;
        self.scaled_background = self.background.as_ref().map(|bg| bg.scale_to_fill(size));
        for widget in self.widgets_mut() {
            widget.rescale();
        }
        debug!(width = size.width, height = size.height, "screen rescaled");
    }
}

/// LIFO stack of screens; the top one is active.
#[derive(Default)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Scene>>,
}

impl ScreenStack {
    pub fn new() -> Self { Self::default() }

    pub fn push(
        &mut self,
        screen: Box<dyn Scene>,
    ) {
        self.screens.push(screen);
    }

    #[allow(dead_code)] // The visualizer never leaves its only screen
    pub fn pop(&mut self) -> Option<Box<dyn Scene>> { self.screens.pop() }

    /// Tick the top screen only. Returns `false` when the stack is empty.
    pub fn tick(
        &mut self,
        events: &[InputEvent],
        dt: Duration,
        surface: &mut Surface,
    ) -> bool {
        match self.screens.last_mut() {
            Some(screen) => {
                screen.tick(events, dt, surface);
                true
            }
            None => false,
        }
    }

    /// Rescale every stacked screen, not just the active one.
    pub fn rescale(
        &mut self,
        size: Size,
    ) {
        for screen in &mut self.screens {
            screen.rescale(size);
        }
    }

    /// Drain the refresh counters of every screen.
    pub fn take_refresh_count(&mut self) -> u32 { self.screens.iter_mut().map(|s| s.take_refresh_count()).sum() }
}
