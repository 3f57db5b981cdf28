use chrono::{DateTime, Utc};

/// Time source for cache expiry, `fetched_at` stamps, and relative-time
/// labels. Injected so tests can pin "now".
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
pub mod test_support {
    use super::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::Mutex;

    /// Fixed clock that only moves when a test advances it.
    pub struct ManualClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self {
                now: Mutex::new(now),
            }
        }

        pub fn at_default() -> Self {
            Self::new(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
        }

        pub fn advance(&self, delta: Duration) {
            *self.now.lock().unwrap() += delta;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }
}
