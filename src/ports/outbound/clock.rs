use chrono::{DateTime, Utc};

/// Clock port. Scans read the time only through this trait.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// IdGenerator port for short unique identifiers (working directory names)
pub trait IdGenerator {
    fn next_id(&self) -> String;
}
