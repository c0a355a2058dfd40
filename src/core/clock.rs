//=========================================================================
// Clock
//=========================================================================
//
// Monotonic time source sampled once per logic tick.
//
// Time is expressed as a `Duration` since the clock's epoch so it can be
// driven by hand in tests (ManualClock) and by `Instant` at runtime
// (SystemClock). Scenes never read the clock directly; they receive the
// sampled value through `GlobalContext::time`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

//=== Clock Trait =========================================================

/// Monotonic time source.
///
/// Successive calls to [`Clock::now`] never go backwards.
pub trait Clock: Send {
    /// Time elapsed since the clock's epoch.
    fn now(&self) -> Duration;
}

//=== SystemClock =========================================================

/// Wall-clock backed by [`Instant`]; epoch is construction time.
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

//=== ManualClock =========================================================

/// Clock that only moves when told to.
///
/// Clones share the same time, so a test can keep one handle while the
/// logic loop owns another.
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        *self.lock() += delta;
    }

    /// Jumps to `to`; ignored if `to` is in the past.
    pub fn set(&self, to: Duration) {
        let mut now = self.lock();
        if to > *now {
            *now = to;
        }
    }

    fn lock(&self) -> MutexGuard<'_, Duration> {
        // A poisoned guard still holds a valid Duration.
        self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.lock()
    }
}

//=== FrameTime ===========================================================

/// Clock sample for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameTime {
    /// Time since the clock's epoch.
    pub now: Duration,

    /// Time since the previous tick (zero on the first tick).
    pub delta: Duration,
}

impl FrameTime {
    /// Builds the next sample from the previous one.
    pub fn advance_to(self, now: Duration) -> Self {
        Self {
            now,
            delta: now.saturating_sub(self.now),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
