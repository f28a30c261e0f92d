//! The sampling distribution screen.
//!
//! Two sliders pick the sample size and the number of samples; three toggles
//! pick which series the figure shows. Every frame the screen snapshots its
//! widgets and compares against the previous frame (see [`crate::render`]):
//! label text follows the sliders immediately, while the expensive resample
//! and replot waits for a slider release or a toggle flip.
//!
//! # Layout
//!
//! The figure fills the upper three quarters, centered at `(w / 2, h * 3/8)`.
//! The controls sit on a proportional grid below it:
//!
//! ```text
//!       c1   a1  c2      a2       c3  a3   c4 a4 c5
//! r1    |========|================|========|=====|
//! b1    |text: no|-------o------- | toggle:|  #  | b3
//!       |        |                |========|=====| r4
//! r2    |========|================| toggle:|  #  | b4
//! b2    |text: no|-------o------- |========|=====| r5
//!       |        |                | toggle:|  #  | b5
//! r3    |========|================|========|=====|
//! ```
//!
//! Rows are 24ths of the window height, columns 12ths of the width (see
//! [`crate::config`]). `a*` and `b*` are the midpoints widgets are
//! centered on.

use core::fmt::Write;
use std::time::{Duration, Instant};

use embedded_graphics::prelude::*;
use heapless::String;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{Scene, Screen, SliderId, TextId, ToggleId};
use crate::assets::{AssetStore, ICON_KEY, LABEL_FONTS_KEY};
use crate::bitmap::{Bitmap, Surface};
use crate::colors::WHITE;
use crate::config::{
    BADGE_INSET_DIVISOR,
    BADGE_SIZE_DIVISOR,
    COL_LABELS,
    COL_RIGHT,
    COL_SLIDERS,
    COL_TOGGLE_LABELS,
    COL_TOGGLES,
    FIGURE_ASPECT,
    FIGURE_CENTER_Y,
    FIGURE_HEIGHT,
    FOOTER_HEIGHT_DIVISOR,
    FOOTER_WIDTH_DIVISOR,
    GRID_COLS,
    GRID_ROWS,
    INITIAL_SLIDER_VALUE,
    ROW_BOTTOM,
    ROW_MIDDLE,
    ROW_TOGGLE_1,
    ROW_TOGGLE_2,
    ROW_TOP,
};
use crate::dataset::{Dataset, Population};
use crate::error::AssetError;
use crate::geometry::Rect;
use crate::input::InputEvent;
use crate::plot::{Figure, Series, y_limit};
use crate::render::{WidgetSnapshot, sample_count_for, sample_size_for};
use crate::sampling::SamplingRun;
use crate::widgets::{HorizontalAlign, Slider, Text, Toggle, Widget};

/// Project credit shown in the bottom-left corner.
const CREDIT: &str = "https://github.com/Scaniox";

type LabelText = String<32>;

fn size_label(sample_size: usize) -> LabelText {
    let mut text = LabelText::new();
    write!(text, "sample size: {sample_size}").ok();
    text
}

fn count_label(sample_count: usize) -> LabelText {
    let mut text = LabelText::new();
    write!(text, "sample count: {sample_count}").ok();
    text
}

/// Widget handles owned by the main screen.
struct Controls {
    size_slider: SliderId,
    count_slider: SliderId,
    size_label: TextId,
    count_label: TextId,
    bars_toggle: ToggleId,
    polygon_toggle: ToggleId,
    normal_toggle: ToggleId,
    bars_label: TextId,
    polygon_label: TextId,
    normal_label: TextId,
    credit: TextId,
}

/// Central Limit Theorem visualizer screen.
pub struct MainScreen {
    base: Screen,
    controls: Controls,

    dataset: Dataset,
    population: Population,
    /// Fixed y-axis ceiling, computed once from the population.
    y_max: f64,
    rng: StdRng,

    sample_size: usize,
    sample_count: usize,
    previous: WidgetSnapshot,

    figure: Figure,
    /// `figure` rasterized at the current window size.
    plot_image: Bitmap,

    icon: Bitmap,
    badge: Bitmap,
    badge_rect: Rect,

    /// Refreshes not yet collected by `take_refresh_count`.
    pending_refreshes: u32,
    total_refreshes: u64,
}

impl MainScreen {
    /// Build the screen, compute the initial plot and lay it out for `size`.
    pub fn new(
        dataset: Dataset,
        assets: &AssetStore,
        size: Size,
        rng: StdRng,
    ) -> Result<Self, AssetError> {
        let fonts = assets.fonts(LABEL_FONTS_KEY)?;
        let icon = assets.get(ICON_KEY)?.clone();

        let mut base = Screen::new();
        let sample_size = sample_size_for(INITIAL_SLIDER_VALUE);
        let sample_count = sample_count_for(INITIAL_SLIDER_VALUE);
        let controls = Controls {
            size_slider: base.add_slider(Slider::new(INITIAL_SLIDER_VALUE)),
            count_slider: base.add_slider(Slider::new(INITIAL_SLIDER_VALUE)),
            size_label: base.add_text(Text::new(size_label(sample_size).as_str(), fonts)),
            count_label: base.add_text(Text::new(count_label(sample_count).as_str(), fonts)),
            bars_toggle: base.add_toggle(Toggle::new(true)),
            polygon_toggle: base.add_toggle(Toggle::new(true)),
            normal_toggle: base.add_toggle(Toggle::new(false)),
            bars_label: base.add_text(Text::new("bar chart", fonts)),
            polygon_label: base.add_text(Text::new("frequency polygon", fonts)),
            normal_label: base.add_text(Text::new("expected distribution", fonts)),
            credit: base.add_text(Text::new(CREDIT, fonts).with_align(HorizontalAlign::Left)),
        };

        let population = Population::from_values(dataset.values());
        let y_max = y_limit(&population);
        info!(
            records = dataset.len(),
            mean = population.mean,
            variance = population.variance,
            min = population.min,
            max = population.max,
            "population statistics"
        );

        let mut screen = Self {
            base,
            controls,
            dataset,
            population,
            y_max,
            rng,
            sample_size,
            sample_count,
            previous: WidgetSnapshot::default(),
            figure: Figure::new(
                &population,
                y_max,
                &SamplingRun {
                    sample_size,
                    sample_count,
                    buckets: Vec::new(),
                    sample_mean_std_dev: 0.0,
                },
                Series {
                    bars: false,
                    polygon: false,
                    normal: false,
                },
            ),
            plot_image: Bitmap::new(Size::zero()),
            icon,
            badge: Bitmap::new(Size::zero()),
            badge_rect: Rect::ZERO,
            pending_refreshes: 0,
            total_refreshes: 0,
        };
        screen.previous = screen.snapshot();
        screen.resample();
        screen.rescale(size);
        Ok(screen)
    }

    /// Current widget state.
    fn snapshot(&self) -> WidgetSnapshot {
        let c = &self.controls;
        let size_slider = self.base.slider(c.size_slider);
        let count_slider = self.base.slider(c.count_slider);
        WidgetSnapshot {
            sample_size: sample_size_for(size_slider.value()),
            sample_count: sample_count_for(count_slider.value()),
            size_grabbed: size_slider.is_grabbed(),
            count_grabbed: count_slider.is_grabbed(),
            show_bars: self.base.toggle(c.bars_toggle).is_ticked(),
            show_polygon: self.base.toggle(c.polygon_toggle).is_ticked(),
            show_normal: self.base.toggle(c.normal_toggle).is_ticked(),
        }
    }

    fn series(&self) -> Series {
        Series {
            bars: self.previous.show_bars,
            polygon: self.previous.show_polygon,
            normal: self.previous.show_normal,
        }
    }

    /// Draw new samples and rebuild the figure model.
    fn resample(&mut self) {
        let started = Instant::now();
        let run = SamplingRun::run(self.dataset.values(), self.sample_size, self.sample_count, &mut self.rng);
        self.figure = Figure::new(&self.population, self.y_max, &run, self.series());
        self.pending_refreshes += 1;
        self.total_refreshes += 1;
        debug!(
            sample_size = self.sample_size,
            sample_count = self.sample_count,
            buckets = run.buckets.len(),
            series = ?self.figure.series(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "resampled"
        );
    }

    /// Resample, then rasterize at the current window size.
    fn refresh_plot(&mut self) {
        self.resample();
        self.plot_image = self.figure.rasterize(self.figure_size());
    }

    /// Figure size for the current window: 4:3, three quarters of the height.
    fn figure_size(&self) -> Size {
        let height = self.base.size().height as f32 * FIGURE_HEIGHT;
        Size::new((height * FIGURE_ASPECT).round() as u32, height.round() as u32)
    }

    fn update_labels(&mut self) {
        let size_text = size_label(self.sample_size);
        let count_text = count_label(self.sample_count);
        self.base.text_mut(self.controls.size_label).set_text(&size_text);
        self.base.text_mut(self.controls.count_label).set_text(&count_text);
    }

    /// Write every widget rectangle for a window of `size`.
    fn layout(
        &mut self,
        size: Size,
    ) {
        let (w, h) = (size.width as i32, size.height as i32);
        let row = |n: i32| h * n / GRID_ROWS;
        let col = |n: i32| w * n / GRID_COLS;

        let (r1, r4, r2, r5, r3) = (row(ROW_TOP), row(ROW_TOGGLE_1), row(ROW_MIDDLE), row(ROW_TOGGLE_2), row(ROW_BOTTOM));
        let (c1, c2, c3, c4, c5) = (col(COL_LABELS), col(COL_SLIDERS), col(COL_TOGGLE_LABELS), col(COL_TOGGLES), col(COL_RIGHT));
        let (b1, b2) = ((r1 + r2) / 2, (r2 + r3) / 2);
        let (b3, b4, b5) = ((r1 + r4) / 2, (r4 + r5) / 2, (r5 + r3) / 2);
        let (a1, a2, a3, a4) = ((c1 + c2) / 2, (c2 + c3) / 2, (c3 + c4) / 2, (c4 + c5) / 2);

        let centered = |width: i32, height: i32, x: i32, y: i32| {
            let mut rect = Rect::new(0, 0, width, height);
            rect.set_center(Point::new(x, y));
            rect
        };

        let c = &self.controls;
        let placements: [(TextId, Rect); 5] = [
            (c.size_label, centered(c2 - c1, (r2 - r1) / 3, a1, b1)),
            (c.count_label, centered(c2 - c1, (r3 - r2) / 3, a1, b2)),
            (c.bars_label, centered(c4 - c3, (r4 - r1) / 2, a3, b3)),
            (c.polygon_label, centered(c4 - c3, (r5 - r4) / 2, a3, b4)),
            (c.normal_label, centered(c4 - c3, (r3 - r5) / 2, a3, b5)),
        ];
        let sliders = [
            (c.size_slider, centered(c3 - c2, (r2 - r1) / 2, a2, b1)),
            (c.count_slider, centered(c3 - c2, (r3 - r2) / 2, a2, b2)),
        ];
        let toggles = [
            (c.bars_toggle, centered((r4 - r1) / 2, (r4 - r1) / 2, a4, b3)),
            (c.polygon_toggle, centered((r5 - r4) / 2, (r5 - r4) / 2, a4, b4)),
            (c.normal_toggle, centered((r3 - r5) / 2, (r3 - r5) / 2, a4, b5)),
        ];
        let mut credit = Rect::new(0, 0, w / FOOTER_WIDTH_DIVISOR, h / FOOTER_HEIGHT_DIVISOR);
        credit.set_left(0);
        credit.set_bottom(h);
        let credit_id = c.credit;

        for (id, rect) in placements {
            self.base.text_mut(id).set_rect(rect);
        }
        for (id, rect) in sliders {
            self.base.slider_mut(id).set_rect(rect);
        }
        for (id, rect) in toggles {
            self.base.toggle_mut(id).set_rect(rect);
        }
        self.base.text_mut(credit_id).set_rect(credit);

        let side = h / BADGE_SIZE_DIVISOR;
        let inset = h / BADGE_INSET_DIVISOR;
        self.badge_rect = Rect::new(w - inset - side, inset, side, side);
    }

    /// Top-left corner that centers the plot at `(w / 2, h * 3/8)`.
    fn plot_origin(&self) -> Point {
        let size = self.base.size();
        let mut rect = Rect::from_size(self.plot_image.size());
        rect.set_center(Point::new(size.width as i32 / 2, (size.height as f32 * FIGURE_CENTER_Y) as i32));
        Point::new(rect.x, rect.y)
    }
}

impl Scene for MainScreen {
    fn tick(
        &mut self,
        events: &[InputEvent],
        dt: Duration,
        surface: &mut Surface,
    ) {
        self.base.update(events, dt);

        let snapshot = self.snapshot();
        let decision = snapshot.compare(&self.previous);
        if decision.labels {
            self.sample_size = snapshot.sample_size;
            self.sample_count = snapshot.sample_count;
            self.update_labels();
        }
        self.previous = snapshot;
        if decision.refresh_plot {
            self.refresh_plot();
        }

        surface.clear(WHITE).ok();
        self.plot_image.blit(surface, self.plot_origin()).ok();
        self.base.render(surface);
        self.badge.blit(surface, Point::new(self.badge_rect.x, self.badge_rect.y)).ok();
    }

    fn rescale(
        &mut self,
        size: Size,
    ) {
        self.layout(size);
        self.base.rescale(size);
        self.plot_image = self.figure.rasterize(self.figure_size());
        self.badge = self.icon.scaled(self.badge_rect.size());
        debug!(width = size.width, height = size.height, "main screen laid out");
    }

    fn take_refresh_count(&mut self) -> u32 { core::mem::take(&mut self.pending_refreshes) }
}
