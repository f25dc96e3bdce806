use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use chrono::DateTime;
use chrono::Utc;

/// Time source for expiry math.
///
/// The authentication pipeline never reads the wall clock directly; it asks
/// the injected clock so token lifetimes are deterministic under test.
/// Instants are plain chrono values, so "add a duration" produces a new
/// instant and never mutates anything.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests.
///
/// Holds the current instant as a unix timestamp so it can be shared and
/// advanced without locking.
#[derive(Debug)]
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            now: AtomicI64::new(instant.timestamp()),
        }
    }

    pub fn set(&self, instant: DateTime<Utc>) {
        self.now.store(instant.timestamp(), Ordering::Relaxed);
    }

    pub fn advance_seconds(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::Relaxed);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.now.load(Ordering::Relaxed), 0)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
