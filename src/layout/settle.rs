//! Settle Timer - one-shot deferred remeasure.
//!
//! After the sequence changes structurally, the first layout read may come
//! from the frame that was on screen before the change. The settle timer
//! holds a single deadline; the event loop polls it and remeasures once the
//! deadline passes.
//!
//! # Pattern
//!
//! - `schedule` replaces whatever was pending: at most one task at a time
//! - `cancel` drops the pending task (superseded or torn down)
//! - `fire` consumes the task once due; the remeasure it triggers is
//!   idempotent, so firing late or twice is harmless
//!
//! No threads are involved. Time is passed in, which keeps tests
//! deterministic.

use std::time::{Duration, Instant};

use tracing::trace;

/// A cancellable one-shot deadline.
#[derive(Debug, Clone)]
pub struct SettleTimer {
    delay: Duration,
    deadline: Option<Instant>,
    scheduled: u64,
}

impl SettleTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
            scheduled: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer for `now + delay`, superseding any pending deadline.
    pub fn schedule(&mut self, now: Instant) {
        if self.deadline.is_some() {
            trace!("settle superseded");
        }
        self.deadline = Some(now + self.delay);
        self.scheduled += 1;
    }

    /// Drop the pending task, if any.
    pub fn cancel(&mut self) {
        if self.deadline.take().is_some() {
            trace!("settle cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// How many times the timer has been armed.
    pub fn schedule_count(&self) -> u64 {
        self.scheduled
    }

    /// Time left until the pending deadline (zero once due).
    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    /// Consume the pending task if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                trace!("settle fired");
                true
            }
            _ => false,
        }
    }
}
