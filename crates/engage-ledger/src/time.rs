use std::sync::atomic::{AtomicI64, Ordering};

/// Clock seam for expiry gating. Injected so time-gated transitions can be
/// tested without sleeping.
pub trait TimeSource: Send + Sync {
    /// Current unix timestamp in seconds.
    fn now(&self) -> i64;
}

/// Wall-clock time.
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Manually driven clock for tests.
pub struct ManualTimeSource {
    current: AtomicI64,
}

impl ManualTimeSource {
    pub fn new(start: i64) -> Self {
        Self {
            current: AtomicI64::new(start),
        }
    }

    pub fn advance(&self, secs: i64) {
        self.current.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, timestamp: i64) {
        self.current.store(timestamp, Ordering::SeqCst);
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }
}
