use std::time::{Duration, Instant};

/// Source of "now" for anything driven by a `RepeatingTick`.
pub trait TimeSource {
    fn now(&self) -> Instant;
}

/// Production time source backed by `Instant::now`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl TimeSource for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven time for deterministic tests. Clones share the same offset.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualTime {
    base: Instant,
    offset: std::rc::Rc<std::cell::Cell<Duration>>,
}

#[cfg(test)]
impl ManualTime {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Default::default(),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

#[cfg(test)]
impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

/// Handle for a callback that should run once per `period`.
///
/// The handle does not run anything itself; its owner asks it whether a tick
/// is due. Dropping the handle cancels the schedule.
#[derive(Debug, Clone)]
pub struct RepeatingTick {
    period: Duration,
    next_due: Instant,
}

impl RepeatingTick {
    /// Schedule the first tick one full `period` after `now`.
    pub fn start(now: Instant, period: Duration) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Consume one due tick, if any. Calling this in a loop yields every tick
    /// that fell due since the last call, one at a time.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.period;
        true
    }

    /// Time left until the next tick (zero if one is already due).
    pub fn until_due(&self, now: Instant) -> Duration {
        self.next_due.saturating_duration_since(now)
    }
}
