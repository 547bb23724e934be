use std::time::{Duration, Instant};

/// Running counters for one batch, owned by the runner.
///
/// Derived values are computed on demand from the three stored fields so
/// they can never drift out of sync with each other.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub completed: usize,
    pub total: usize,
    started: Instant,
}

impl RunStats {
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Average wall-clock time per completed item; `None` before the
    /// first completion.
    pub fn average_per_item(&self) -> Option<Duration> {
        if self.completed == 0 {
            return None;
        }
        Some(self.elapsed() / self.completed as u32)
    }

    /// Estimated time to finish the remaining items; `None` before the
    /// first completion.
    pub fn eta(&self) -> Option<Duration> {
        let avg = self.average_per_item()?;
        let remaining = self.total.saturating_sub(self.completed) as u32;
        Some(avg * remaining)
    }
}
