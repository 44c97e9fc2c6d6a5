#![forbid(unsafe_code)]

//! Wall-clock abstraction for submission timestamps.
//!
//! The controller never calls `Utc::now()` directly; `eventTime` flows
//! through [`SubmissionClock`] so tests can pin it.

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the `eventTime` stamped on emoji payloads.
pub trait SubmissionClock {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// System wall clock (`Date.now()` on `wasm32`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SubmissionClock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn set(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }

    /// Advance by `dt`, saturating at the maximum representable time.
    pub fn advance(&mut self, dt: TimeDelta) {
        self.now = self.now.checked_add_signed(dt).unwrap_or(DateTime::<Utc>::MAX_UTC);
    }
}

impl SubmissionClock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.now
    }
}
