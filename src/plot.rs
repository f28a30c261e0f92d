//! Figure model and rasterization.
//!
//! A [`Figure`] holds everything needed to draw the sampling-distribution
//! chart: axis limits, the bucketed sample means, the expected normal curve
//! and the three statistics shown above the axes. It is built once per plot
//! refresh and can be rasterized any number of times, so a window resize
//! redraws the same figure at a new size without resampling.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ P(mean = x) density                      │
//! │  population mean  population std  sample │  <- statistics at 0, 1/3, 2/3
//! │    ┌─────────────────────────────────┐   │
//! │0.30┤          ▁▃█▃▁                  │   │
//! │    │        ▁█████▁                  │   │
//! │0.00┤______▁▃███████▃▁________________│   │
//! │    └──┬───────┬───────┬───────┬──────┘   │
//! │      10      15      20      25     30   │
//! │                    x                     │
//! └──────────────────────────────────────────┘
//! ```
//!
//! Series are clipped to the axes rectangle.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::PrimitiveStyle;
use embedded_graphics::text::Text;
use heapless::String;
use tracing::debug;

use crate::bitmap::Bitmap;
use crate::colors::{SERIES_BARS, SERIES_NORMAL, SERIES_POLYGON, WHITE};
use crate::config::{BAR_WIDTH, Y_LIMIT_SAMPLE_SIZE};
use crate::dataset::Population;
use crate::geometry::Rect;
use crate::sampling::{Bucket, SamplingRun, expected_curve, linspace, normal_pdf};
use crate::styles::{AXIS_STROKE, CENTERED_MIDDLE, LEFT_BOTTOM, PLOT_TEXT_STYLE, RIGHT_MIDDLE, TOP_LEFT};
use crate::widgets::{draw_polyline, fill_rect};

/// Number of labelled ticks on each axis.
const TICK_COUNT: usize = 5;

/// Tick mark length in pixels.
const TICK_LENGTH: i32 = 4;

/// Smaller axes are left blank.
const MIN_AXES: i32 = 16;

/// Axes rectangle as fractions of the figure (left, top, right, bottom).
const AXES_LEFT: f32 = 0.125;
const AXES_TOP: f32 = 0.12;
const AXES_RIGHT: f32 = 0.9;
const AXES_BOTTOM: f32 = 0.88;

const X_LABEL: &str = "x";
const Y_LABEL: &str = "P(mean = x) density";

/// Magnitudes from here on are written in scientific notation.
const SCIENTIFIC_FROM: f64 = 1e15;

/// Longest prefix plus a scientific or 15-digit value.
type Label = String<64>;

/// Which series are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Series {
    pub bars: bool,
    pub polygon: bool,
    pub normal: bool,
}

/// Fixed y-axis ceiling: the peak of the expected curve at the largest sample size.
///
/// Degenerate populations (zero variance) fall back to `1.0`.
pub fn y_limit(population: &Population) -> f64 {
    let std_dev = (population.variance / Y_LIMIT_SAMPLE_SIZE).sqrt();
    let peak = normal_pdf(population.mean, population.mean, std_dev);
    if peak.is_finite() && peak > 0.0 { peak } else { 1.0 }
}

/// Axis limits that always span a non-empty range.
fn x_limits(population: &Population) -> (f64, f64) {
    if population.max > population.min {
        (population.min, population.max)
    } else {
        (population.min - 0.5, population.max + 0.5)
    }
}

/// A plotted sampling distribution, ready to rasterize.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    x_limits: (f64, f64),
    y_max: f64,
    series: Series,
    buckets: Vec<Bucket>,
    curve: Vec<(f64, f64)>,
    statistics: [Label; 3],
}

impl Figure {
    /// Build the figure for one sampling run.
    pub fn new(
        population: &Population,
        y_max: f64,
        run: &SamplingRun,
        series: Series,
    ) -> Self {
        let x_limits = x_limits(population);
        let curve = if series.normal {
            expected_curve(population.mean, population.variance, run.sample_size, x_limits.0, x_limits.1)
        } else {
            Vec::new()
        };
        Self {
            x_limits,
            y_max,
            series,
            buckets: run.buckets.clone(),
            curve,
            statistics: [
                stat_label("population mean: ", population.mean),
                stat_label("population std: ", population.std_dev()),
                stat_label("sample mean std: ", run.sample_mean_std_dev),
            ],
        }
    }

    #[inline]
    pub const fn series(&self) -> Series { self.series }

    /// Statistics lines in drawing order.
    pub fn statistics(&self) -> impl Iterator<Item = &str> { self.statistics.iter().map(|s| s.as_str()) }

    /// Axes rectangle inside a figure of `size`.
    pub fn axes_rect(size: Size) -> Rect {
        let (w, h) = (size.width as f32, size.height as f32);
        let left = (w * AXES_LEFT) as i32;
        let top = (h * AXES_TOP) as i32;
        Rect::new(left, top, (w * AXES_RIGHT) as i32 - left, (h * AXES_BOTTOM) as i32 - top)
    }

    /// Draw the figure into a new opaque bitmap of `size`.
    pub fn rasterize(
        &self,
        size: Size,
    ) -> Bitmap {
        let mut image = Bitmap::filled(size, WHITE);
        let axes = Self::axes_rect(size);
        if axes.width < MIN_AXES || axes.height < MIN_AXES {
            return image;
        }
        let mapper = Mapper::new(axes, self.x_limits, self.y_max);

        {
            let mut clipped = image.clipped(&axes.to_rectangle());
            if self.series.bars {
                self.draw_bars(&mut clipped, &mapper);
            }
            if self.series.polygon {
                let points = self.buckets.iter().map(|b| mapper.point(b.x, b.density));
                draw_polyline(&mut clipped, points, PrimitiveStyle::with_stroke(SERIES_POLYGON, 2));
            }
            if self.series.normal {
                let points = self.curve.iter().map(|&(x, y)| mapper.point(x, y));
                draw_polyline(&mut clipped, points, PrimitiveStyle::with_stroke(SERIES_NORMAL, 2));
            }
        }

        self.draw_axes(&mut image, axes, &mapper);
        debug!(width = size.width, height = size.height, buckets = self.buckets.len(), "figure rasterized");
        image
    }

    fn draw_bars<D>(
        &self,
        target: &mut D,
        mapper: &Mapper,
    ) where
        D: DrawTarget<Color = Rgb888>,
    {
        let half = BAR_WIDTH / 2.0;
        for bucket in &self.buckets {
            let left = mapper.x(bucket.x - half);
            let right = mapper.x(bucket.x + half).max(left + 1);
            let top = mapper.y(bucket.density);
            let bottom = mapper.y(0.0) + 1;
            fill_rect(target, Rect::new(left, top, right - left, bottom - top), SERIES_BARS);
        }
    }

    fn draw_axes(
        &self,
        image: &mut Bitmap,
        axes: Rect,
        mapper: &Mapper,
    ) {
        axes.to_rectangle().into_styled(AXIS_STROKE).draw(image).ok();

        let (x_min, x_max) = self.x_limits;
        let x_decimals = tick_decimals(x_max - x_min);
        for value in linspace(x_min, x_max, TICK_COUNT) {
            let x = mapper.x(value);
            let top = Point::new(x, axes.bottom() - 1);
            draw_polyline(image, [top, top + Point::new(0, TICK_LENGTH)], AXIS_STROKE);
            let label = tick_label(value, x_decimals);
            Text::with_text_style(&label, Point::new(x, axes.bottom() + TICK_LENGTH + 7), PLOT_TEXT_STYLE, CENTERED_MIDDLE)
                .draw(image)
                .ok();
        }

        let y_decimals = tick_decimals(self.y_max);
        for value in linspace(0.0, self.y_max, TICK_COUNT) {
            let y = mapper.y(value);
            let right = Point::new(axes.left(), y);
            draw_polyline(image, [right, right - Point::new(TICK_LENGTH, 0)], AXIS_STROKE);
            let label = tick_label(value, y_decimals);
            Text::with_text_style(&label, Point::new(axes.left() - TICK_LENGTH - 2, y), PLOT_TEXT_STYLE, RIGHT_MIDDLE)
                .draw(image)
                .ok();
        }

        Text::with_text_style(
            X_LABEL,
            Point::new(axes.center_x(), axes.bottom() + TICK_LENGTH + 22),
            PLOT_TEXT_STYLE,
            CENTERED_MIDDLE,
        )
        .draw(image)
        .ok();
        Text::with_text_style(Y_LABEL, Point::new(4, 4), PLOT_TEXT_STYLE, TOP_LEFT).draw(image).ok();

        for (i, line) in self.statistics.iter().enumerate() {
            let x = axes.left() + axes.width * i as i32 / 3;
            Text::with_text_style(line, Point::new(x, axes.top() - 3), PLOT_TEXT_STYLE, LEFT_BOTTOM)
                .draw(image)
                .ok();
        }
    }
}

/// Data-to-pixel transform for one axes rectangle.
struct Mapper {
    axes: Rect,
    x_min: f64,
    x_span: f64,
    y_max: f64,
}

impl Mapper {
    fn new(
        axes: Rect,
        (x_min, x_max): (f64, f64),
        y_max: f64,
    ) -> Self {
        Self {
            axes,
            x_min,
            x_span: x_max - x_min,
            y_max,
        }
    }

    fn x(
        &self,
        value: f64,
    ) -> i32 {
        let t = (value - self.x_min) / self.x_span;
        to_pixel(f64::from(self.axes.left()) + t * f64::from(self.axes.width - 1))
    }

    fn y(
        &self,
        value: f64,
    ) -> i32 {
        let t = value / self.y_max;
        to_pixel(f64::from(self.axes.bottom() - 1) - t * f64::from(self.axes.height - 1))
    }

    fn point(
        &self,
        x: f64,
        y: f64,
    ) -> Point {
        Point::new(self.x(x), self.y(y))
    }
}

/// Round to a pixel, keeping infinities and huge values drawable.
fn to_pixel(value: f64) -> i32 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(-100_000.0, 100_000.0).round() as i32
}

/// Decimal places for tick labels spanning `span`.
fn tick_decimals(span: f64) -> usize {
    match span.abs() {
        s if s >= 50.0 => 0,
        s if s >= 5.0 => 1,
        s if s >= 0.5 => 2,
        _ => 3,
    }
}

fn tick_label(
    value: f64,
    decimals: usize,
) -> Label {
    let mut label = Label::new();
    if value.abs() >= SCIENTIFIC_FROM {
        write!(label, "{value:.2e}").ok();
    } else {
        write!(label, "{value:.decimals$}").ok();
    }
    label
}

/// `prefix` followed by `value` rounded to 3 decimals, always with a fractional part.
fn stat_label(
    prefix: &str,
    value: f64,
) -> Label {
    let rounded = (value * 1000.0).round() / 1000.0;
    let mut label = Label::new();
    label.push_str(prefix).ok();
    if rounded.abs() >= SCIENTIFIC_FROM {
        write!(label, "{rounded:.3e}").ok();
    } else if rounded.fract() == 0.0 {
        write!(label, "{rounded:.1}").ok();
    } else {
        write!(label, "{rounded}").ok();
    }
    label
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    const POOL: [f64; 3] = [10.0, 20.0, 30.0];

    fn figure(series: Series) -> Figure {
        let population = Population::from_values(&POOL);
        let mut rng = StdRng::seed_from_u64(11);
        let run = SamplingRun::run(&POOL, 4, 2000, &mut rng);
        Figure::new(&population, y_limit(&population), &run, series)
    }

    fn count_color(
        image: &Bitmap,
        color: Rgb888,
    ) -> usize {
        let size = image.size();
        (0..size.width as i32)
            .flat_map(|x| (0..size.height as i32).map(move |y| Point::new(x, y)))
            .filter(|&p| image.pixel(p) == Some(color))
            .count()
    }

    const ALL: Series = Series {
        bars: true,
        polygon: true,
        normal: true,
    };

    #[test]
    fn test_y_limit_is_peak_at_largest_sample_size() {
        let population = Population::from_values(&POOL);
        let expected = normal_pdf(20.0, 20.0, (200.0 / 3.0 / 100.0_f64).sqrt());
        assert!((y_limit(&population) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_y_limit_degenerate_population() {
        let population = Population::from_values(&[5.0, 5.0]);
        assert_eq!(y_limit(&population), 1.0);
        assert_eq!(x_limits(&population), (4.5, 5.5));
    }

    #[test]
    fn test_statistics_are_rounded_to_three_decimals() {
        let figure = figure(ALL);
        let lines: Vec<&str> = figure.statistics().collect();
        assert_eq!(lines[0], "population mean: 20.0");
        assert_eq!(lines[1], "population std: 8.165");
        assert!(lines[2].starts_with("sample mean std: "));
    }

    #[test]
    fn test_huge_values_keep_their_statistics() {
        let pool = [1e24, 3e24];
        let population = Population::from_values(&pool);
        let run = SamplingRun::run(&pool, 2, 500, &mut StdRng::seed_from_u64(5));
        let figure = Figure::new(&population, y_limit(&population), &run, ALL);
        let lines: Vec<&str> = figure.statistics().collect();
        assert_eq!(lines[0], "population mean: 2.000e24");
        assert_eq!(lines[1], "population std: 1.000e24");
        assert!(lines[2].len() > "sample mean std: ".len(), "Sample std value is missing: {:?}", lines[2]);
        assert!(lines[2].contains('e'));
    }

    #[test]
    fn test_rasterize_has_requested_size() {
        let figure = figure(ALL);
        assert_eq!(figure.rasterize(Size::new(600, 450)).size(), Size::new(600, 450));
        assert_eq!(figure.rasterize(Size::new(1200, 900)).size(), Size::new(1200, 900));
    }

    #[test]
    fn test_series_toggles_control_colors() {
        let image = figure(ALL).rasterize(Size::new(600, 450));
        assert!(count_color(&image, SERIES_BARS) > 0);
        assert!(count_color(&image, SERIES_POLYGON) > 0);
        assert!(count_color(&image, SERIES_NORMAL) > 0);

        let none = figure(Series {
            bars: false,
            polygon: false,
            normal: false,
        })
        .rasterize(Size::new(600, 450));
        assert_eq!(count_color(&none, SERIES_BARS), 0);
        assert_eq!(count_color(&none, SERIES_POLYGON), 0);
        assert_eq!(count_color(&none, SERIES_NORMAL), 0);
    }

    #[test]
    fn test_series_stay_inside_axes() {
        let size = Size::new(400, 300);
        let image = figure(ALL).rasterize(size);
        let axes = Figure::axes_rect(size);
        for x in 0..size.width as i32 {
            for y in 0..size.height as i32 {
                let p = Point::new(x, y);
                if matches!(image.pixel(p), Some(c) if c == SERIES_BARS || c == SERIES_NORMAL) {
                    assert!(axes.contains(p), "Series pixel {p:?} outside axes {axes:?}");
                }
            }
        }
    }

    #[test]
    fn test_tiny_figure_is_blank() {
        let image = figure(ALL).rasterize(Size::new(4, 4));
        assert_eq!(count_color(&image, WHITE), 16);
    }

    #[test]
    fn test_tick_labels() {
        assert_eq!(tick_label(12.5, tick_decimals(20.0)).as_str(), "12.5");
        assert_eq!(tick_label(0.123_45, tick_decimals(0.3)).as_str(), "0.123");
        assert_eq!(tick_label(250.0, tick_decimals(100.0)).as_str(), "250");
        assert_eq!(tick_label(-1.5e300, 0).as_str(), "-1.50e300", "Huge ticks stay readable");
    }
}
