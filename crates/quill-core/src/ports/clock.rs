use chrono::{DateTime, Utc};

/// Time source for publish timestamps and slug suffixes.
///
/// Injected so the catalog's timestamp behavior can be pinned down in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
