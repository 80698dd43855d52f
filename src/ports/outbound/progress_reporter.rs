/// ProgressReporter port for user-facing progress messages
///
/// Messages go to a human (stderr by default). Diagnostics for developers
/// go through `tracing` instead.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports progress through a countable task, such as archive entries
    ///
    /// # Arguments
    /// * `current` - Entries processed so far
    /// * `total` - Total entries
    /// * `message` - Optional message to include
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
