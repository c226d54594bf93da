//! Time source for overview generation stamps.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, LazyLock};

use chrono::{DateTime, Utc};

/// Source of "now" in UTC.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant. Useful for deterministic tests.
#[derive(Debug, Copy, Clone)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Wraps a clock so that it never goes backwards within the process.
///
/// Readings are kept at microsecond resolution. If the inner clock steps back
/// (NTP adjustment, VM migration), the last issued instant is returned again.
#[derive(Debug)]
pub struct MonotonicClock<C = SystemClock> {
    inner: C,
    last_micros: AtomicI64,
}

impl<C: Clock> MonotonicClock<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            last_micros: AtomicI64::new(i64::MIN),
        }
    }
}

impl Default for MonotonicClock<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

static PROCESS_CLOCK: LazyLock<Arc<MonotonicClock>> = LazyLock::new(|| Arc::new(MonotonicClock::default()));

/// The monotonic system clock shared by everything in this process.
pub fn process_clock() -> Arc<MonotonicClock> {
    Arc::clone(&PROCESS_CLOCK)
}

impl<C: Clock> Clock for MonotonicClock<C> {
    fn now(&self) -> DateTime<Utc> {
        let reading = self.inner.now();
        let candidate = reading.timestamp_micros();
        let previous = self.last_micros.fetch_max(candidate, Ordering::AcqRel);
        let issued = previous.max(candidate);
        DateTime::<Utc>::from_timestamp_micros(issued).unwrap_or(reading)
    }
}
