//! `RecordOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use qs_core::{EntityId, SimTime};
use qs_sim::SimObserver;
use qs_stats::{AbandonmentRecord, MeasurementRecord, RunSummary, StageRecord};
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::row::{JourneyRow, PoolRow, StageRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes journeys and stage passes to any
/// [`OutputWriter`] backend as they happen.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error], then hand the summary to
/// [`write_summary`][Self::write_summary] to write the pool rows and close
/// the files.
pub struct RecordOutputObserver<W: OutputWriter> {
    writer:     W,
    /// Wait and completed stages so far, for entities still in the system.
    progress:   FxHashMap<EntityId, (f64, u32)>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> RecordOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            progress:   FxHashMap::default(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Write one row per pool and close the writer.
    pub fn write_summary(&mut self, summary: &RunSummary) -> OutputResult<()> {
        let rows: Vec<PoolRow> = summary.pools.iter().map(PoolRow::from).collect();
        self.writer.write_pool_summaries(&rows)?;
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for RecordOutputObserver<W> {
    fn on_stage_complete(&mut self, record: &StageRecord) {
        let entry = self.progress.entry(record.entity).or_insert((0.0, 0));
        entry.0 += record.wait;
        entry.1 += 1;
        let result = self.writer.write_stage(&StageRow::from(record));
        self.store_err(result);
    }

    fn on_complete(&mut self, record: &MeasurementRecord) {
        self.progress.remove(&record.entity);
        let result = self.writer.write_journey(&JourneyRow::from(record));
        self.store_err(result);
    }

    fn on_abandon(&mut self, record: &AbandonmentRecord) {
        let (prior_wait, stages) = self.progress.remove(&record.entity).unwrap_or((0.0, 0));
        let row = JourneyRow::abandoned(record, prior_wait, stages);
        let result = self.writer.write_journey(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, now: SimTime) {
        debug!(time = now.as_f64(), in_system = self.progress.len(), "Flushing output");
        let result = self.writer.flush();
        self.store_err(result);
    }
}
