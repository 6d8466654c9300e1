//! `StatsCollector` — the append-only measurement sink of one run.

use crate::summary::{self, RunSummary, SummaryContext};
use crate::{AbandonmentRecord, MeasurementRecord, StageRecord};

/// Owned by exactly one simulation and lent (`&mut`) to each process as it
/// reaches a measurement point.  Never global: two runs in the same address
/// space cannot see each other's records.
#[derive(Debug, Default, Clone)]
pub struct StatsCollector {
    arrived:   u64,
    stage_log: Vec<StageRecord>,
    records:   Vec<MeasurementRecord>,
    abandoned: Vec<AbandonmentRecord>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Recording ─────────────────────────────────────────────────────────

    /// Count one entity entering the system.
    pub fn record_arrival(&mut self) {
        self.arrived += 1;
    }

    /// Append one completed stage pass.
    pub fn record_stage(&mut self, record: StageRecord) {
        self.stage_log.push(record);
    }

    /// Append the journey record of an entity that finished its pipeline.
    pub fn record_completion(&mut self, record: MeasurementRecord) {
        self.records.push(record);
    }

    pub fn record_abandonment(&mut self, record: AbandonmentRecord) {
        self.abandoned.push(record);
    }

    // ── Raw access ────────────────────────────────────────────────────────

    pub fn arrived(&self) -> u64 {
        self.arrived
    }

    pub fn served(&self) -> u64 {
        self.records.len() as u64
    }

    /// Completed stage passes in completion order, including passes by
    /// entities that have not (yet) finished their journey.
    pub fn stage_log(&self) -> &[StageRecord] {
        &self.stage_log
    }

    /// Journey records of served entities, in completion order.
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    pub fn abandonments(&self) -> &[AbandonmentRecord] {
        &self.abandoned
    }

    // ── Aggregation ───────────────────────────────────────────────────────

    /// Derive a [`RunSummary`] from everything recorded so far.
    pub fn summarize(&self, ctx: &SummaryContext<'_>) -> RunSummary {
        summary::build(self, ctx)
    }
}
