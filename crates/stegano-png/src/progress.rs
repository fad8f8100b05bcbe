//! Progress reporting for the embed and extract pipelines.
//!
//! An observer is handed down explicitly, there is no shared state. Events
//! are sent at row or bit-block granularity and always once more when a
//! stage completes.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressEvent {
    RowsDefiltered { done: u64, total: u64 },
    BitsEmbedded { done: u64, total: u64 },
    BitsExtracted { done: u64, total: u64 },
    RowsFiltered { done: u64, total: u64 },
}

pub trait Progress {
    fn on_progress(&mut self, event: ProgressEvent);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn on_progress(&mut self, _event: ProgressEvent) {}
}

impl<F> Progress for F
where
    F: FnMut(ProgressEvent),
{
    fn on_progress(&mut self, event: ProgressEvent) {
        self(event)
    }
}

/// number of bits between two bit progress events
pub(crate) const BIT_REPORT_INTERVAL: u64 = 4096;
