use std::time::{Duration, Instant};

/// How long the refresh indicator may stay up without a completed fetch.
pub const REFRESH_INDICATOR_TIMEOUT: Duration = Duration::from_millis(3000);

/// The "refreshing" indicator. It clears on whichever comes first: the
/// fetch it was started for completes, or the timeout elapses.
#[derive(Debug, Default)]
pub struct RefreshIndicator {
    deadline: Option<Instant>,
}

impl RefreshIndicator {
    pub fn start(&mut self, now: Instant) {
        self.deadline = Some(now + REFRESH_INDICATOR_TIMEOUT);
    }

    pub fn complete(&mut self) {
        self.deadline = None;
    }

    /// Drop the indicator once its deadline has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            self.deadline = None;
        }
    }

    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }
}
