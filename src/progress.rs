//! Batched progress reporting
//!
//! Progress updates are pushed in bounded-frequency batches rather than per
//! file, so a consumer backed by a database or UI is not hammered once per
//! transfer. The batching discipline lives in [`progress_batch`]; the sink is
//! the [`ProgressReporter`] trait with a no-op default.

/// Sink for batched progress updates
///
/// `set_progress(batch, total)` is invoked with the number of files completed
/// since the previous update and the total selection size.
pub trait ProgressReporter: Send + Sync {
    /// Record that `batch` more files out of `total` have been transferred
    fn set_progress(&self, batch: usize, total: usize);
}

/// Progress reporter that drops every update
///
/// Default sink when the caller does not care about progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpProgressReporter;

impl ProgressReporter for NoOpProgressReporter {
    fn set_progress(&self, _batch: usize, _total: usize) {}
}

/// Progress reporter that forwards `(batch, total)` over an unbounded channel
///
/// Useful for consumers that want to observe progress from another task.
#[derive(Clone, Debug)]
pub struct ChannelProgressReporter {
    tx: tokio::sync::mpsc::UnboundedSender<(usize, usize)>,
}

impl ChannelProgressReporter {
    /// Create a reporter and the receiving half of its channel
    pub fn new() -> (
        Self,
        tokio::sync::mpsc::UnboundedReceiver<(usize, usize)>,
    ) {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl ProgressReporter for ChannelProgressReporter {
    fn set_progress(&self, batch: usize, total: usize) {
        // Receiver gone means nobody is listening anymore
        self.tx.send((batch, total)).ok();
    }
}

/// Batch size to report after transferring the 1-based `index`-th of `total`
/// files, or `None` when no update is due
///
/// Selections under 10 files report every file with a batch of 1. Larger
/// selections report 10 on every 10th file and the remainder on the final
/// file — except when the final index is itself a multiple of 10, where the
/// update is 10, never 0.
pub fn progress_batch(index: usize, total: usize) -> Option<usize> {
    if total < 10 {
        return Some(1);
    }
    if index == total {
        let remainder = total % 10;
        return Some(if remainder == 0 { 10 } else { remainder });
    }
    if index % 10 == 0 { Some(10) } else { None }
}
