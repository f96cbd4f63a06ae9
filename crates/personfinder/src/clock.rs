//! Injectable time source.
//!
//! Anything that needs the current time takes a `&dyn Clock` instead of
//! calling `Utc::now()` directly, so tests can pin time without touching
//! process-wide state.

use std::sync::RwLock;

use chrono::{DateTime, Utc};

/// A source of the current UTC time.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A wall clock whose reading can be pinned and later released.
///
/// Share one instance between the code under test and the test itself; call
/// [`reset`](Self::reset) in teardown to go back to real time.
#[derive(Debug, Default)]
pub struct OverridableClock {
    fixed: RwLock<Option<DateTime<Utc>>>,
}

impl OverridableClock {
    /// Create a clock that reads real time until overridden.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the clock to `now`, or release it with `None`.
    pub fn set_override(&self, now: Option<DateTime<Utc>>) {
        let mut fixed = self
            .fixed
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *fixed = now;
    }

    /// Return to real time.
    pub fn reset(&self) {
        self.set_override(None);
    }

    /// Whether the clock is currently pinned.
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.fixed
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .is_some()
    }
}

impl Clock for OverridableClock {
    fn now(&self) -> DateTime<Utc> {
        let fixed = *self
            .fixed
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        fixed.unwrap_or_else(Utc::now)
    }
}
