//! Debounced detection scheduling
//!
//! Pages mutate in bursts while a single-page application renders. Each
//! burst should cost one detection pass, run once the page has been quiet
//! for `delay`. The detector owns at most one pending callback; scheduling
//! again replaces it and restarts the wait.
//!
//! There is no timer thread. The host calls [`DebouncedDetector::poll`]
//! when its own timer fires (see [`DebouncedDetector::next_deadline`]).

use crate::config::DebounceConfig;
use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Manually advanced time source shared between a test and a detector
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn now(&self) -> Duration {
        self.now.get()
    }
}

/// Monotonic time source
#[derive(Debug, Clone)]
pub enum Clock {
    /// Time elapsed since the given instant
    System(Instant),
    Manual(ManualClock),
}

impl Clock {
    pub fn system() -> Self {
        Clock::System(Instant::now())
    }

    pub fn now(&self) -> Duration {
        match self {
            Clock::System(origin) => origin.elapsed(),
            Clock::Manual(clock) => clock.now(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

impl From<ManualClock> for Clock {
    fn from(clock: ManualClock) -> Self {
        Clock::Manual(clock)
    }
}

struct Pending<F> {
    deadline: Duration,
    callback: F,
}

/// Coalesces bursts of detection requests into a single run
pub struct DebouncedDetector<F = Box<dyn FnOnce()>> {
    delay: Duration,
    min_interval: Duration,
    clock: Clock,
    pending: Option<Pending<F>>,
    last_fire: Option<Duration>,
}

impl<F: FnOnce()> DebouncedDetector<F> {
    pub fn new(delay: Duration, min_interval: Duration) -> Self {
        Self {
            delay,
            min_interval,
            clock: Clock::system(),
            pending: None,
            last_fire: None,
        }
    }

    pub fn from_config(config: &DebounceConfig) -> Self {
        Self::new(config.delay(), config.min_interval())
    }

    pub fn with_clock(mut self, clock: impl Into<Clock>) -> Self {
        self.clock = clock.into();
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Replace any pending callback and restart the wait.
    pub fn schedule(&mut self, callback: F) {
        let now = self.clock.now();
        if self.within_min_interval() {
            tracing::debug!(
                min_interval_ms = self.min_interval.as_millis() as u64,
                "scheduling within minimum interval of last run"
            );
        }
        if self.pending.is_some() {
            tracing::trace!("replacing pending detection");
        }
        self.pending = Some(Pending {
            deadline: now + self.delay,
            callback,
        });
    }

    /// Drop the pending callback without running it.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("pending detection cancelled");
        }
    }

    /// Drop the pending callback and run `callback` now.
    pub fn flush(&mut self, callback: F) {
        self.cancel();
        self.fire(callback);
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Run the pending callback if its deadline has passed.
    pub fn poll(&mut self) -> bool {
        let now = self.clock.now();
        match self.pending.take() {
            Some(pending) if pending.deadline <= now => {
                self.fire(pending.callback);
                true
            }
            other => {
                self.pending = other;
                false
            }
        }
    }

    /// Clock reading at which the pending callback becomes due.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Whether the last run happened less than `min_interval` ago.
    pub fn within_min_interval(&self) -> bool {
        self.last_fire
            .is_some_and(|last| self.clock.now().saturating_sub(last) < self.min_interval)
    }

    pub fn last_fire(&self) -> Option<Duration> {
        self.last_fire
    }

    fn fire(&mut self, callback: F) {
        tracing::debug!("running detection");
        callback();
        self.last_fire = Some(self.clock.now());
    }
}

impl<F: FnOnce()> Default for DebouncedDetector<F> {
    fn default() -> Self {
        Self::from_config(&DebounceConfig::default())
    }
}
