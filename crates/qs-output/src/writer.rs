//! The `OutputWriter` trait implemented by backend writers.

use crate::{JourneyRow, OutputResult, PoolRow, StageRow};

/// Trait implemented by output backends.
///
/// Errors raised while a run is in progress are stored by the observer and
/// retrieved with [`RecordOutputObserver::take_error`][crate::RecordOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one entity's journey (served or abandoned).
    fn write_journey(&mut self, row: &JourneyRow) -> OutputResult<()>;

    /// Write one completed stage pass.
    fn write_stage(&mut self, row: &StageRow) -> OutputResult<()>;

    /// Write the end-of-run per-pool rows.
    fn write_pool_summaries(&mut self, rows: &[PoolRow]) -> OutputResult<()>;

    /// Push buffered rows to disk without closing anything.
    fn flush(&mut self) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
