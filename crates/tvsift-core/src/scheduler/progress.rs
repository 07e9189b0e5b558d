//! Progress snapshots for one document's dispatch.

/// Snapshot of dispatch progress (CLI-friendly).
#[derive(Debug, Clone, Default)]
pub struct ProgressStats {
    /// Source URL being processed.
    pub source: String,
    /// Candidates validated so far.
    pub done: usize,
    /// Candidates in this document.
    pub total: usize,
    /// Candidates accepted so far.
    pub accepted: usize,
    /// Elapsed time since dispatch start (seconds).
    pub elapsed_secs: f64,
}

impl ProgressStats {
    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.done as f64 / self.total as f64).min(1.0)
    }

    /// Validations per second (0 if elapsed is 0).
    pub fn rate(&self) -> f64 {
        if self.elapsed_secs <= 0.0 {
            return 0.0;
        }
        self.done as f64 / self.elapsed_secs
    }

    /// Estimated seconds remaining (None if rate is 0).
    pub fn eta_secs(&self) -> Option<f64> {
        let remaining = self.total.saturating_sub(self.done);
        if remaining == 0 {
            return Some(0.0);
        }
        let rate = self.rate();
        if rate <= 0.0 {
            return None;
        }
        Some(remaining as f64 / rate)
    }
}
