//! Lightweight call timing utilities.
//!
//! Measures how much time the safe and fast component paths spend in
//! argument handling versus the model engine. Each `CallTimings` carries its
//! own enable flag and counters, so independent owners never see each
//! other's calls.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// A simple timer that measures elapsed time.
///
/// A disabled timer never reads the clock.
pub struct Timer {
    start: Option<Instant>,
}

impl Timer {
    /// Create and start a new timer.
    pub fn start() -> Self {
        Self {
            start: Some(Instant::now()),
        }
    }

    /// A timer that records nothing.
    pub fn disabled() -> Self {
        Self { start: None }
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If the timer is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        self.start.map(|start| start.elapsed().as_secs_f64())
    }

    /// Stop the timer and add the elapsed time to an accumulator.
    pub fn stop_into(self, acc: &AccumulatingTimer) {
        if let Some(elapsed) = self.stop() {
            acc.record(elapsed);
        }
    }
}

/// Accumulating timer for tracking total time across multiple calls.
#[derive(Debug)]
pub struct AccumulatingTimer {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Default for AccumulatingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulatingTimer {
    /// Create a new accumulating timer.
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Record a timing measurement.
    pub fn record(&self, duration_s: f64) {
        let nanos = (duration_s * 1e9) as u64;
        self.total_ns.fetch_add(nanos, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total time spent (in seconds).
    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 / 1e9
    }

    /// Get number of calls.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Get average time per call (in seconds).
    pub fn average_seconds(&self) -> f64 {
        let count = self.count();
        if count > 0 {
            self.total_seconds() / count as f64
        } else {
            0.0
        }
    }

    /// Reset the timer.
    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Component call timers.
#[derive(Debug, Default)]
pub struct CallTimings {
    enabled: bool,
    /// Time spent in `allocate_return_space`
    pub allocate: AccumulatingTimer,
    /// Time spent in the validating `compute` path (engine time included)
    pub compute: AccumulatingTimer,
    /// Time spent in `compute_fast` (engine time included)
    pub compute_fast: AccumulatingTimer,
    /// Time spent pushing state into the model engine
    pub engine_set_state: AccumulatingTimer,
    /// Time spent in model engine queries (inverse dynamics, limits)
    pub engine_query: AccumulatingTimer,
}

impl CallTimings {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start a timer if recording is enabled.
    pub fn timer(&self) -> Timer {
        if self.enabled {
            Timer::start()
        } else {
            Timer::disabled()
        }
    }

    fn all(&self) -> [(&'static str, &AccumulatingTimer); 5] {
        [
            ("allocate_return_space", &self.allocate),
            ("compute", &self.compute),
            ("compute_fast", &self.compute_fast),
            ("engine set_state", &self.engine_set_state),
            ("engine query", &self.engine_query),
        ]
    }

    /// Reset all call timers.
    pub fn reset_all(&self) {
        for (_, timer) in self.all() {
            timer.reset();
        }
    }

    /// Total number of recorded calls across every stage.
    pub fn total_count(&self) -> u64 {
        self.all().iter().map(|(_, timer)| timer.count()).sum()
    }

    /// Format a summary of every timer that recorded at least one call.
    pub fn summary(&self) -> String {
        let mut out = String::from("=== Component Call Breakdown ===\n");
        for (label, timer) in self.all() {
            let count = timer.count();
            if count == 0 {
                continue;
            }
            let _ = writeln!(
                out,
                "{:<22} {} calls, {:.6}s total, {:.3}us avg",
                label,
                count,
                timer.total_seconds(),
                timer.average_seconds() * 1e6
            );
        }
        out
    }
}

/// Format a duration in seconds using the most readable unit.
pub fn format_duration(seconds: f64) -> String {
    let mut out = String::new();
    if seconds >= 1.0 {
        let _ = write!(out, "{:.3}s", seconds);
    } else if seconds >= 1e-3 {
        let _ = write!(out, "{:.3}ms", seconds * 1e3);
    } else if seconds >= 1e-6 {
        let _ = write!(out, "{:.3}us", seconds * 1e6);
    } else {
        let _ = write!(out, "{:.0}ns", seconds * 1e9);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulating_timer_average() {
        let timer = AccumulatingTimer::new();
        assert_eq!(timer.average_seconds(), 0.0);

        timer.record(0.5);
        timer.record(1.5);
        assert_eq!(timer.count(), 2);
        assert!((timer.total_seconds() - 2.0).abs() < 1e-6);
        assert!((timer.average_seconds() - 1.0).abs() < 1e-6);

        timer.reset();
        assert_eq!(timer.count(), 0);
    }

    #[test]
    fn format_duration_units() {
        assert_eq!(format_duration(2.0), "2.000s");
        assert_eq!(format_duration(0.0025), "2.500ms");
        assert_eq!(format_duration(3.5e-6), "3.500us");
        assert_eq!(format_duration(4e-8), "40ns");
    }

    #[test]
    fn summary_lists_recorded_stages_only() {
        let timings = CallTimings::new(true);
        assert!(timings.summary().starts_with("=== Component Call Breakdown ==="));

        timings.compute.record(1e-6);
        let summary = timings.summary();
        assert!(summary.contains("compute "));
        assert!(!summary.contains("allocate_return_space"));
        assert_eq!(timings.total_count(), 1);

        timings.reset_all();
        assert_eq!(timings.total_count(), 0);
    }

    #[test]
    fn disabled_timings_record_nothing() {
        let timings = CallTimings::new(false);
        assert!(!timings.is_enabled());
        timings.timer().stop_into(&timings.compute);
        assert_eq!(timings.compute.count(), 0);

        let timings = CallTimings::new(true);
        timings.timer().stop_into(&timings.compute);
        assert_eq!(timings.compute.count(), 1);
    }
}
