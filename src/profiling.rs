//! Frame timing statistics.
//!
//! The application loop records every frame's total, busy and sleep time.
//! A frame whose busy time exceeds the budget is a stall; plot refreshes are
//! the usual cause, so stalls are reported at `debug` level together with the
//! number of refreshes seen so far. A one-line summary is logged at `debug`
//! level every [`STATS_LOG_INTERVAL`](crate::config::STATS_LOG_INTERVAL).
//!
//! # Usage
//!
//! ```ignore
//! let mut stats = FrameStats::new(FRAME_TIME);
//!
//! // In the loop:
//! let frame_start = Instant::now();
//! // ... tick + present ...
//! let busy = frame_start.elapsed();
//! // ... sleep ...
//! stats.record_frame(frame_start.elapsed(), busy, sleep);
//! ```

use core::fmt::Write;
use std::time::{Duration, Instant};

use heapless::String;
use tracing::debug;

/// Frame timing and counters, all times in microseconds.
pub struct FrameStats {
    /// Busy time above this counts as a stall.
    budget: Duration,

    /// Total frame time (busy + sleep + overhead)
    pub frame_time_us: u32,
    /// Time spent ticking the screen and presenting
    pub busy_time_us: u32,
    /// Time spent sleeping (vsync governor)
    pub sleep_time_us: u32,

    pub frame_time_min_us: u32,
    pub frame_time_max_us: u32,
    /// Exponential moving average of the frame time
    frame_time_avg_us: f32,

    pub total_frames: u64,
    /// Frames whose busy time exceeded the budget
    pub stalls: u32,
    /// Plot refreshes reported by the active screen
    pub plot_refreshes: u32,

    start_time: Instant,
    last_summary: Instant,
}

impl FrameStats {
    /// Moving average weight of the newest frame.
    const EMA_ALPHA: f32 = 0.1;

    pub fn new(budget: Duration) -> Self {
        let now = Instant::now();
        Self {
            budget,
            frame_time_us: 0,
            busy_time_us: 0,
            sleep_time_us: 0,
            frame_time_min_us: u32::MAX,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            stalls: 0,
            plot_refreshes: 0,
            start_time: now,
            last_summary: now,
        }
    }

    /// Record one frame. Returns `true` when the frame stalled.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        busy_time: Duration,
        sleep_time: Duration,
    ) -> bool {
        let total_us = micros(total_time);
        self.frame_time_us = total_us;
        self.busy_time_us = micros(busy_time);
        self.sleep_time_us = micros(sleep_time);

        self.frame_time_min_us = self.frame_time_min_us.min(total_us);
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }
        self.total_frames += 1;

        let stalled = busy_time > self.budget;
        if stalled {
            self.stalls += 1;
            debug!(
                busy_us = self.busy_time_us,
                budget_us = micros(self.budget),
                plot_refreshes = self.plot_refreshes,
                "frame stall"
            );
        }
        stalled
    }

    /// Count plot refreshes performed since the last frame.
    #[inline]
    pub const fn add_plot_refreshes(
        &mut self,
        count: u32,
    ) {
        self.plot_refreshes += count;
    }

    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    /// Average frames per second derived from the moving average.
    pub fn fps(&self) -> f32 {
        if self.frame_time_avg_us <= 0.0 { 0.0 } else { 1_000_000.0 / self.frame_time_avg_us }
    }

    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }

    /// Uptime as `HH:MM:SS`.
    pub fn uptime_string(&self) -> String<12> {
        let secs = self.uptime().as_secs();
        let mut s = String::new();
        write!(s, "{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60).ok();
        s
    }

    /// Log a summary line if `interval` has passed since the previous one.
    pub fn maybe_log_summary(
        &mut self,
        interval: Duration,
    ) {
        if self.last_summary.elapsed() < interval {
            return;
        }
        self.last_summary = Instant::now();
        debug!(
            uptime = %self.uptime_string(),
            frames = self.total_frames,
            fps = format_args!("{:.1}", self.fps()),
            avg_us = self.frame_time_avg_us(),
            min_us = self.frame_time_min_us,
            max_us = self.frame_time_max_us,
            last_us = self.frame_time_us,
            last_sleep_us = self.sleep_time_us,
            stalls = self.stalls,
            plot_refreshes = self.plot_refreshes,
            "frame stats"
        );
    }
}

#[inline]
fn micros(duration: Duration) -> u32 { u32::try_from(duration.as_micros()).unwrap_or(u32::MAX) }

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing::Level;

    use super::*;
    use std::string::String;

    const BUDGET: Duration = Duration::from_micros(16_667);

    #[test]
    fn test_new_stats() {
        let stats = FrameStats::new(BUDGET);
        assert_eq!(stats.total_frames, 0);
        assert_eq!(stats.frame_time_min_us, u32::MAX);
        assert_eq!(stats.frame_time_max_us, 0);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_record_frame() {
        let mut stats = FrameStats::new(BUDGET);
        let stalled = stats.record_frame(
            Duration::from_micros(16_000),
            Duration::from_micros(4_000),
            Duration::from_micros(12_000),
        );
        assert!(!stalled);
        assert_eq!(stats.total_frames, 1);
        assert_eq!(stats.frame_time_us, 16_000);
        assert_eq!(stats.busy_time_us, 4_000);
        assert_eq!(stats.sleep_time_us, 12_000);
        assert_eq!(stats.frame_time_avg_us(), 16_000);
    }

    #[test]
    fn test_frame_min_max() {
        let mut stats = FrameStats::new(BUDGET);
        for us in [20_000, 15_000, 25_000] {
            stats.record_frame(Duration::from_micros(us), Duration::from_micros(us / 2), Duration::ZERO);
        }
        assert_eq!(stats.frame_time_min_us, 15_000);
        assert_eq!(stats.frame_time_max_us, 25_000);
    }

    #[test]
    fn test_stall_counting() {
        let mut stats = FrameStats::new(BUDGET);
        stats.add_plot_refreshes(1);
        let stalled = stats.record_frame(Duration::from_millis(120), Duration::from_millis(120), Duration::ZERO);
        assert!(stalled, "Busy time over budget is a stall");
        assert_eq!(stats.stalls, 1);
        assert_eq!(stats.plot_refreshes, 1);
    }

    #[test]
    fn test_uptime_string_format() {
        let stats = FrameStats::new(BUDGET);
        let uptime = stats.uptime_string();
        assert_eq!(uptime.len(), 8);
        assert!(uptime.starts_with("00:00:0"));
    }

    /// Collects formatted log output.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().map_err(|_| io::Error::other("poisoned"))?.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    fn summary_output(level: Level) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(move || writer.clone())
            .finish();
        let mut stats = FrameStats::new(BUDGET);
        tracing::subscriber::with_default(subscriber, || stats.maybe_log_summary(Duration::ZERO));
        let bytes = captured.0.lock().expect("log buffer").clone();
        String::from_utf8(bytes).expect("utf-8 log output")
    }

    #[test]
    fn test_summary_is_debug_level() {
        assert!(!summary_output(Level::INFO).contains("frame stats"), "Summary stays quiet at info");
        assert!(summary_output(Level::DEBUG).contains("frame stats"));
    }

    #[test]
    fn test_summary_waits_for_interval() {
        let mut stats = FrameStats::new(BUDGET);
        let before = stats.last_summary;
        stats.maybe_log_summary(Duration::from_secs(3600));
        assert_eq!(stats.last_summary, before, "No summary before the interval passes");
        std::thread::sleep(Duration::from_millis(2));
        stats.maybe_log_summary(Duration::ZERO);
        assert!(stats.last_summary > before);
    }
}
