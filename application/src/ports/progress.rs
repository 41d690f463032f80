//! Progress notification port
//!
//! Defines the interface for reporting progress while batches run.

/// Callback for progress updates during a review
///
/// Implementations live in the presentation layer.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a batch is dispatched
    fn on_batch_start(&self, batch: usize, total_batches: usize, batch_size: usize);

    /// Called when one record's pipeline finishes (`index` is its input position)
    fn on_record_complete(&self, index: usize, success: bool);

    /// Called when every record in a batch has finished
    fn on_batch_complete(&self, batch: usize);

    /// Called once the PII guard has finished
    fn on_pii_checked(&self, _issue_count: usize, _blocked: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_batch_start(&self, _batch: usize, _total_batches: usize, _batch_size: usize) {}
    fn on_record_complete(&self, _index: usize, _success: bool) {}
    fn on_batch_complete(&self, _batch: usize) {}
}
