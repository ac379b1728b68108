//! Search statistics.

use std::time::Duration;

/// Counters collected over one `optimize()` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStatistics {
    /// Objective evaluations performed.
    pub evaluations: u64,
    /// Accepted add/remove steps (double greedy counts one step per element).
    pub steps: u64,
    /// Steps that added an element.
    pub additions: u64,
    /// Steps that removed an element.
    pub removals: u64,
    /// Completed restarts (double greedy tries, smooth local search runs).
    pub tries: u64,
    /// Samples drawn by omega estimates, both arms together.
    pub omega_samples: u64,
    /// Omega estimates cut off by the sample budget before reaching the
    /// error bound.
    pub truncated_omega_estimates: u64,
    /// Wall-clock time.
    pub duration: Duration,
}

impl SearchStatistics {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns evaluations per second, or 0 when no time elapsed.
    pub fn evaluations_per_second(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.evaluations as f64 / secs
        } else {
            0.0
        }
    }

    /// Returns the duration in whole milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}
