//! Change detection deciding when the main screen does expensive work.
//!
//! The main screen reads its widgets every frame and packs the values that
//! matter into a [`WidgetSnapshot`]. Comparing it with the previous frame's
//! snapshot yields a [`RenderDecision`]:
//!
//! | Change | Work |
//! |--------|------|
//! | sample size or count | Rewrite and re-rasterize the two labels |
//! | any toggle flipped | Resample and replot |
//! | a slider released (grabbed → not grabbed) | Resample and replot |
//! | slider dragged while grabbed | Labels only |
//!
//! Dragging a slider changes the parameters on almost every frame. A full
//! resample at 15 000 samples takes far longer than a frame, so the plot waits
//! until the handle is let go.

use crate::config::{MAX_SAMPLE_COUNT, MAX_SAMPLE_SIZE, MIN_SAMPLE_COUNT, MIN_SAMPLE_SIZE};

/// Map a slider value to an integer in `[min, max]`.
///
/// `value * (max - min) + min` rounded half to even.
pub fn slider_to_range(
    value: f32,
    min: usize,
    max: usize,
) -> usize {
    let span = max.saturating_sub(min) as f64;
    let mapped = (f64::from(value.clamp(0.0, 1.0)) * span + min as f64).round_ties_even();
    (mapped as usize).clamp(min, max)
}

/// Sample size selected by the size slider, in `[1, 100]`.
#[inline]
pub fn sample_size_for(value: f32) -> usize { slider_to_range(value, MIN_SAMPLE_SIZE, MAX_SAMPLE_SIZE) }

/// Sample count selected by the count slider, in `[1, 15000]`.
#[inline]
pub fn sample_count_for(value: f32) -> usize { slider_to_range(value, MIN_SAMPLE_COUNT, MAX_SAMPLE_COUNT) }

/// Widget state observed by the main screen in one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidgetSnapshot {
    pub sample_size: usize,
    pub sample_count: usize,
    pub size_grabbed: bool,
    pub count_grabbed: bool,
    pub show_bars: bool,
    pub show_polygon: bool,
    pub show_normal: bool,
}

/// What has to be redone after comparing two snapshots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderDecision {
    /// Parameter labels need new text.
    pub labels: bool,
    /// The plot needs a resample and redraw.
    pub refresh_plot: bool,
}

impl WidgetSnapshot {
    /// Compare against the previous frame.
    pub const fn compare(
        &self,
        previous: &Self,
    ) -> RenderDecision {
        let labels = self.sample_size != previous.sample_size || self.sample_count != previous.sample_count;
        let toggles_changed = self.show_bars != previous.show_bars
            || self.show_polygon != previous.show_polygon
            || self.show_normal != previous.show_normal;
        let released = (previous.size_grabbed && !self.size_grabbed) || (previous.count_grabbed && !self.count_grabbed);
        RenderDecision {
            labels,
            refresh_plot: toggles_changed || released,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resting() -> WidgetSnapshot {
        WidgetSnapshot {
            sample_size: 50,
            sample_count: 7500,
            size_grabbed: false,
            count_grabbed: false,
            show_bars: true,
            show_polygon: true,
            show_normal: false,
        }
    }

    #[test]
    fn test_slider_mapping_bounds() {
        assert_eq!(sample_size_for(0.0), 1);
        assert_eq!(sample_size_for(1.0), 100);
        assert_eq!(sample_count_for(0.0), 1);
        assert_eq!(sample_count_for(1.0), 15_000);
        assert_eq!(sample_size_for(-2.0), 1, "Out-of-range values are clamped");
        assert_eq!(sample_count_for(9.0), 15_000);
    }

    #[test]
    fn test_slider_mapping_midpoint_rounds_half_to_even() {
        // 0.5 * 99 + 1 = 50.5 -> 50, 0.5 * 14999 + 1 = 7500.5 -> 7500
        assert_eq!(sample_size_for(0.5), 50);
        assert_eq!(sample_count_for(0.5), 7500);
    }

    #[test]
    fn test_slider_mapping_is_monotonic() {
        let sizes: Vec<usize> = (0..=100).map(|i| sample_size_for(i as f32 / 100.0)).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_identical_snapshots_do_nothing() {
        assert_eq!(resting().compare(&resting()), RenderDecision::default());
    }

    #[test]
    fn test_drag_updates_labels_without_refresh() {
        let previous = WidgetSnapshot {
            size_grabbed: true,
            ..resting()
        };
        let current = WidgetSnapshot {
            sample_size: 51,
            ..previous
        };
        let decision = current.compare(&previous);
        assert!(decision.labels);
        assert!(!decision.refresh_plot, "Sliding while grabbed never refreshes");
    }

    #[test]
    fn test_release_triggers_refresh() {
        let previous = WidgetSnapshot {
            count_grabbed: true,
            ..resting()
        };
        let decision = resting().compare(&previous);
        assert!(decision.refresh_plot);
        assert!(!decision.labels);
    }

    #[test]
    fn test_grab_does_not_refresh() {
        let current = WidgetSnapshot {
            size_grabbed: true,
            ..resting()
        };
        assert!(!current.compare(&resting()).refresh_plot);
    }

    #[test]
    fn test_each_toggle_triggers_refresh() {
        let flips = [
            WidgetSnapshot {
                show_bars: false,
                ..resting()
            },
            WidgetSnapshot {
                show_polygon: false,
                ..resting()
            },
            WidgetSnapshot {
                show_normal: true,
                ..resting()
            },
        ];
        for current in flips {
            assert!(current.compare(&resting()).refresh_plot, "{current:?} should refresh");
        }
    }
}
