/// A trait for reporting progress of a loading pass.
pub trait Progress: Send + Sync {
    /// Set the phase label for the current operation (e.g., "Loading").
    fn set_phase(&self, phase: &str);

    /// Configure determinate progress reporting.
    ///
    /// The callback returns (total, current, message).
    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>);

    /// Finish and clear the progress indicator.
    fn done(&self);
}
