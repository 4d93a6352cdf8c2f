//! Settle deadline for the transient "is transitioning" flag.

use web_time::{Duration, Instant};

/// An owned settle deadline, re-armed on every committed transition.
///
/// Arming replaces the previous deadline wholesale, so a deadline that was
/// superseded by a later transition can never mis-clear the newer one.
/// Checking an absent or expired deadline is idempotent.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettleTimer {
    deadline: Option<Instant>,
}

impl SettleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms (or re-arms) the timer to expire `duration` after `now`.
    pub fn arm_at(&mut self, now: Instant, duration: Duration) {
        self.deadline = Some(now + duration);
    }

    /// Arms (or re-arms) the timer to expire `duration` from the current time.
    pub fn arm(&mut self, duration: Duration) {
        self.arm_at(Instant::now(), duration);
    }

    /// Whether the timer is armed and has not yet reached its deadline.
    pub fn is_active_at(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|deadline| now < deadline)
    }

    /// Whether the timer is active as of the current time.
    pub fn is_active(&self) -> bool {
        self.is_active_at(Instant::now())
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }
}
