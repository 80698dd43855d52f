/// System adapters for time and identifiers
mod clock;

pub use clock::{SystemClock, UuidGenerator};
