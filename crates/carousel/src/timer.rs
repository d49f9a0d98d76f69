//! Autoplay deadline owned by a controller.

use std::time::Duration;

use tokio::time::Instant;

/// A single pending autoplay firing, or none.
///
/// The timer never decides by itself whether it should run; the owner
/// recomputes the arming predicate and calls [`AutoplayTimer::sync`].
#[derive(Debug)]
pub struct AutoplayTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl AutoplayTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Arms from `now` unless a firing is already pending.
    pub fn arm(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.interval);
        }
    }

    /// Pushes the next firing a full interval past `now`.
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn sync(&mut self, armed: bool, now: Instant) {
        if armed {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| deadline <= now)
    }
}
