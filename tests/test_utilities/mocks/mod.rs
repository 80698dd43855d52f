/// Mock implementations for testing
mod mock_clock;
mod mock_lockfile_reader;
mod mock_progress_reporter;

pub use mock_clock::{FixedClock, SequentialIdGenerator};
pub use mock_lockfile_reader::MockLockfileReader;
pub use mock_progress_reporter::MockProgressReporter;
