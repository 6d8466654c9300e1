//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `journeys.csv`
//! - `stages.csv`
//! - `summary.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{JourneyRow, OutputResult, PoolRow, StageRow};

/// Writes run output to three CSV files.
pub struct CsvWriter {
    journeys: Writer<File>,
    stages:   Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut journeys = Writer::from_path(dir.join("journeys.csv"))?;
        journeys.write_record([
            "entity", "outcome", "arrival", "left_at", "total_time", "total_wait", "stages",
        ])?;

        let mut stages = Writer::from_path(dir.join("stages.csv"))?;
        stages.write_record([
            "entity", "stage", "pool", "enqueued_at", "granted_at", "released_at", "wait", "hold",
            "queue_len_at_enqueue",
        ])?;

        let mut summary = Writer::from_path(dir.join("summary.csv"))?;
        summary.write_record([
            "pool", "name", "capacity", "grants", "busy_time", "utilization_pct",
            "time_avg_queue_len", "max_queue_len",
        ])?;

        Ok(Self {
            journeys,
            stages,
            summary,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_journey(&mut self, row: &JourneyRow) -> OutputResult<()> {
        self.journeys.write_record(&[
            row.entity.to_string(),
            row.outcome.as_str().to_owned(),
            row.arrival.to_string(),
            row.left_at.to_string(),
            row.total_time.to_string(),
            row.total_wait.to_string(),
            row.stages.to_string(),
        ])?;
        Ok(())
    }

    fn write_stage(&mut self, row: &StageRow) -> OutputResult<()> {
        self.stages.write_record(&[
            row.entity.to_string(),
            row.stage.to_string(),
            row.pool.map(|p| p.to_string()).unwrap_or_default(),
            row.enqueued_at.to_string(),
            row.granted_at.to_string(),
            row.released_at.to_string(),
            row.wait.to_string(),
            row.hold.to_string(),
            row.queue_len_at_enqueue.to_string(),
        ])?;
        Ok(())
    }

    fn write_pool_summaries(&mut self, rows: &[PoolRow]) -> OutputResult<()> {
        for row in rows {
            self.summary.write_record(&[
                row.pool.to_string(),
                row.name.clone(),
                row.capacity.to_string(),
                row.grants.to_string(),
                row.busy_time.to_string(),
                row.utilization_pct.to_string(),
                row.time_avg_queue_len.to_string(),
                row.max_queue_len.to_string(),
            ])?;
        }
        Ok(())
    }

    fn flush(&mut self) -> OutputResult<()> {
        self.journeys.flush()?;
        self.stages.flush()?;
        self.summary.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.flush()
    }
}
