//! Window ownership and the frame loop.
//!
//! [`Session`] holds everything a frame touches except the window: the
//! display buffer, the screen stack and the configuration. [`Application`]
//! wraps it with the simulator window and the frame statistics. One iteration
//! of [`Application::run`]:
//!
//! 1. Drain the window's events into an [`InputEvent`] batch
//! 2. [`Session::frame`]: handle window close and resolution cycling, then
//!    tick the top screen with the full batch
//! 3. Rebuild the window if the resolution changed
//! 4. Present, then sleep the rest of the frame budget when vsync is on
//!
//! Closing the window is the only way out of the loop.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, Window};
use tracing::{debug, info, warn};

use crate::bitmap::Surface;
use crate::colors::WHITE;
use crate::config::{AppConfig, FRAME_TIME, STATS_LOG_INTERVAL};
use crate::input::{InputEvent, Key};
use crate::profiling::FrameStats;
use crate::screens::{Scene, ScreenStack};

/// Where settings changed at runtime are written back.
///
/// Holds the file's own contents so command-line overrides never leak into it.
pub struct ConfigStore {
    path: PathBuf,
    stored: AppConfig,
}

impl ConfigStore {
    pub const fn new(
        path: PathBuf,
        stored: AppConfig,
    ) -> Self {
        Self { path, stored }
    }

    /// Persist a new window resolution. Failures are logged, never fatal.
    pub fn save_resolution(
        &mut self,
        resolution: [u32; 2],
    ) {
        self.stored.resolution = resolution;
        if let Err(err) = self.stored.save(&self.path) {
            warn!(%err, "could not save resolution");
        }
    }
}

/// How a frame ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The window was closed.
    Closed,
    /// No screen left to run.
    NoScreens,
    /// The top screen drew a frame. `resized` asks for a new window.
    Drawn { resized: bool },
}

/// Display buffer, screens and settings driven by the frame loop.
pub struct Session {
    config: AppConfig,
    store: Option<ConfigStore>,
    display: Surface,
    screens: ScreenStack,
}

impl Session {
    pub fn new(
        config: AppConfig,
        store: Option<ConfigStore>,
    ) -> Self {
        let display = blank_display(resolution_size(config.resolution));
        Self {
            config,
            store,
            display,
            screens: ScreenStack::new(),
        }
    }

    /// Window size in pixels.
    #[inline]
    pub const fn size(&self) -> Size { resolution_size(self.config.resolution) }

    #[inline]
    pub const fn display(&self) -> &Surface { &self.display }

    pub fn push(
        &mut self,
        screen: Box<dyn Scene>,
    ) {
        self.screens.push(screen);
    }

    /// Handle one event batch.
    ///
    /// A resolution change is applied first; the top screen then sees the
    /// whole batch at the new size, so a release in the same frame still
    /// lets go of a grabbed slider.
    pub fn frame(
        &mut self,
        events: &[InputEvent],
        dt: Duration,
    ) -> FrameOutcome {
        if events.contains(&InputEvent::Quit) {
            return FrameOutcome::Closed;
        }
        let resized = resize_requested(events) && self.cycle_resolution();
        if self.screens.tick(events, dt, &mut self.display) {
            FrameOutcome::Drawn { resized }
        } else {
            FrameOutcome::NoScreens
        }
    }

    /// Switch to the next resolution preset. Returns `false` when there is none.
    fn cycle_resolution(&mut self) -> bool {
        let Some(next) = self.config.next_resolution() else {
            debug!("no resolution presets configured");
            return false;
        };
        self.config.resolution = next;
        let size = resolution_size(next);
        self.display = blank_display(size);
        self.screens.rescale(size);

        if let Some(store) = &mut self.store {
            store.save_resolution(next);
        }
        info!(width = next[0], height = next[1], "resolution changed");
        true
    }
}

pub struct Application {
    session: Session,
    window: Window,
    stats: FrameStats,
}

impl Application {
    pub fn new(
        config: AppConfig,
        store: Option<ConfigStore>,
    ) -> Self {
        let session = Session::new(config, store);
        let mut window = new_window(&session.config.window_title);
        window.update(session.display());
        Self {
            session,
            window,
            stats: FrameStats::new(FRAME_TIME),
        }
    }

    /// Window size in pixels.
    #[inline]
    pub const fn size(&self) -> Size { self.session.size() }

    pub fn push(
        &mut self,
        screen: Box<dyn Scene>,
    ) {
        self.session.push(screen);
    }

    /// Run until the window is closed or the stack empties.
    pub fn run(&mut self) {
        let config = &self.session.config;
        info!(
            width = config.resolution[0],
            height = config.resolution[1],
            vsync = config.vsync,
            "entering main loop"
        );
        let mut last_frame = Instant::now();

        loop {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last_frame);
            last_frame = frame_start;

            let events: Vec<InputEvent> = self.window.events().filter_map(InputEvent::from_simulator).collect();
            match self.session.frame(&events, dt) {
                FrameOutcome::Closed => {
                    info!(frames = self.stats.total_frames, "window closed");
                    return;
                }
                FrameOutcome::NoScreens => {
                    info!("screen stack empty");
                    return;
                }
                FrameOutcome::Drawn { resized } => {
                    self.stats.add_plot_refreshes(self.session.screens.take_refresh_count());
                    if resized {
                        let fresh = new_window(&self.session.config.window_title);
                        let display = &self.session.display;
                        replace_then(&mut self.window, fresh, |window| window.update(display));
                    } else {
                        self.window.update(&self.session.display);
                    }
                }
            }

            let busy = frame_start.elapsed();
            let sleep = frame_sleep(busy, self.session.config.vsync);
            if !sleep.is_zero() {
                thread::sleep(sleep);
            }
            let slept = frame_start.elapsed().saturating_sub(busy);

            self.stats.record_frame(frame_start.elapsed(), busy, slept);
            self.stats.maybe_log_summary(STATS_LOG_INTERVAL);
        }
    }
}

/// A window that opens on its first `update`.
fn new_window(title: &str) -> Window {
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    Window::new(title, &output_settings)
}

/// Swap `fresh` into `slot`, dropping the old value before `first_use` runs.
///
/// Only one SDL event pump may be alive, so the old window has to be gone
/// before the new one presents for the first time.
fn replace_then<T>(
    slot: &mut T,
    fresh: T,
    first_use: impl FnOnce(&mut T),
) {
    drop(core::mem::replace(slot, fresh));
    first_use(slot);
}

fn blank_display(size: Size) -> Surface {
    let mut display = Surface::new(size);
    display.clear(WHITE).ok();
    display
}

#[inline]
const fn resolution_size(resolution: [u32; 2]) -> Size { Size::new(resolution[0], resolution[1]) }

/// Whether the batch asks for the next resolution preset.
fn resize_requested(events: &[InputEvent]) -> bool {
    events.iter().any(|e| matches!(e, InputEvent::KeyDown { key: Key::CycleResolution }))
}

/// Time left in the frame budget after `busy`, or zero without vsync.
fn frame_sleep(
    busy: Duration,
    vsync: bool,
) -> Duration {
    if vsync { FRAME_TIME.saturating_sub(busy) } else { Duration::ZERO }
}
