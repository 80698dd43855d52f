use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use unified_sbom::prelude::*;

/// Clock frozen at a single instant
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2024-01-02T03:04:05Z
    pub fn new() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Hands out `id0001`, `id0002`, ...
#[derive(Default)]
pub struct SequentialIdGenerator {
    next: AtomicUsize,
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("id{:04}", n)
    }
}
