//! Clock abstraction for determinism.

use chrono::{DateTime, Datelike, Utc};

/// Abstraction over system time for deterministic behavior.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// Display-only creation stamp, e.g. `STARDATE 2026.10`.
    fn stardate(&self) -> String {
        let now = self.now();
        format!("STARDATE {}.{}", now.year(), now.month())
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
