use crate::ports::outbound::{Clock, IdGenerator};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// SystemClock adapter reading the wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// UuidGenerator adapter producing the first 8 hex digits of a random UUID
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        id
    }
}
