//! `RunSummary` and the aggregation that produces it.

use serde::Serialize;

use qs_core::{PoolId, SimTime, StageId};

use crate::{MeasurementRecord, StatsCollector};

// ── Inputs from the runner ────────────────────────────────────────────────────

/// Static description of one pipeline stage.
#[derive(Debug, Clone)]
pub struct StageInfo {
    pub name: String,
    pub pool: Option<PoolId>,
}

/// Pool state the collector cannot see on its own.
#[derive(Debug, Clone)]
pub struct PoolSnapshot {
    pub id:                 PoolId,
    pub name:               String,
    pub capacity:           u32,
    pub grants:             u64,
    pub time_avg_queue_len: f64,
    pub max_queue_len:      usize,
}

/// A slot still held when the run stopped.
#[derive(Debug, Clone, Copy)]
pub struct OpenHold {
    pub pool:       PoolId,
    pub granted_at: SimTime,
}

/// Everything besides the records that a summary needs.
#[derive(Debug, Clone)]
pub struct SummaryContext<'a> {
    /// Simulated time covered by the run (the horizon, or the last event).
    pub elapsed:          SimTime,
    pub stages:           &'a [StageInfo],
    pub pools:            &'a [PoolSnapshot],
    /// Holds in progress at `elapsed`; their served portion counts as busy.
    pub open_holds:       &'a [OpenHold],
    /// Entities that arrived but neither finished nor abandoned.
    pub in_system:        u64,
    /// Multiplier turning "served per time unit" into the reported rate
    /// (e.g. 60 for per-hour when time is in minutes).
    pub throughput_scale: f64,
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub stage:                     StageId,
    pub name:                      String,
    pub pool:                      Option<PoolId>,
    pub passes:                    u64,
    pub mean_wait:                 f64,
    pub max_wait:                  f64,
    pub mean_hold:                 f64,
    pub mean_queue_len_at_enqueue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolSummary {
    pub pool:               PoolId,
    pub name:               String,
    pub capacity:           u32,
    pub grants:             u64,
    /// Granted hold time served inside the run window.
    pub busy_time:          f64,
    /// `busy_time / (capacity * elapsed) * 100`, in `[0, 100]`.
    pub utilization_pct:    f64,
    pub time_avg_queue_len: f64,
    pub max_queue_len:      usize,
}

/// Read-only result of a run.
///
/// Every mean is defined (zero) when there is nothing to average, so an
/// empty run summarizes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub arrived:         u64,
    pub served:          u64,
    pub abandoned:       u64,
    pub in_system:       u64,
    pub elapsed:         f64,
    pub mean_total_time: f64,
    pub max_total_time:  f64,
    /// `served / elapsed * throughput_scale`.
    pub throughput:      f64,
    pub stages:          Vec<StageSummary>,
    pub pools:           Vec<PoolSummary>,
    pub records:         Vec<MeasurementRecord>,
}

impl RunSummary {
    pub fn stage(&self, name: &str) -> Option<&StageSummary> {
        self.stages.iter().find(|s| s.name == name)
    }

    pub fn pool(&self, name: &str) -> Option<&PoolSummary> {
        self.pools.iter().find(|p| p.name == name)
    }

    /// `arrived == served + abandoned + in_system`.
    pub fn is_conserved(&self) -> bool {
        self.arrived == self.served + self.abandoned + self.in_system
    }
}

// ── Aggregation ───────────────────────────────────────────────────────────────

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0u64), |(s, n), v| (s + v, n + 1));
    if n == 0 { 0.0 } else { sum / n as f64 }
}

fn max(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

pub(crate) fn build(stats: &StatsCollector, ctx: &SummaryContext<'_>) -> RunSummary {
    let elapsed = ctx.elapsed.as_f64();
    let log = stats.stage_log();
    let records = stats.records();

    let stages = ctx
        .stages
        .iter()
        .enumerate()
        .map(|(i, info)| {
            let id = StageId(i as u16);
            let passes = || log.iter().filter(move |r| r.stage == id);
            StageSummary {
                stage:                     id,
                name:                      info.name.clone(),
                pool:                      info.pool,
                passes:                    passes().count() as u64,
                mean_wait:                 mean(passes().map(|r| r.wait)),
                max_wait:                  max(passes().map(|r| r.wait)),
                mean_hold:                 mean(passes().map(|r| r.hold)),
                mean_queue_len_at_enqueue: mean(passes().map(|r| r.queue_len_at_enqueue as f64)),
            }
        })
        .collect();

    let pools = ctx
        .pools
        .iter()
        .map(|p| {
            let closed: f64 = log
                .iter()
                .filter(|r| r.pool == Some(p.id))
                .map(|r| r.hold)
                .sum();
            let open: f64 = ctx
                .open_holds
                .iter()
                .filter(|h| h.pool == p.id)
                .map(|h| ctx.elapsed.since(h.granted_at))
                .sum();
            let busy_time = closed + open;
            let window = p.capacity as f64 * elapsed;
            let utilization_pct = if window > 0.0 {
                // `min` only absorbs float rounding; busy time cannot exceed the window.
                (busy_time / window * 100.0).min(100.0)
            } else {
                0.0
            };
            PoolSummary {
                pool: p.id,
                name: p.name.clone(),
                capacity: p.capacity,
                grants: p.grants,
                busy_time,
                utilization_pct,
                time_avg_queue_len: p.time_avg_queue_len,
                max_queue_len: p.max_queue_len,
            }
        })
        .collect();

    let served = stats.served();
    let throughput = if elapsed > 0.0 {
        served as f64 / elapsed * ctx.throughput_scale
    } else {
        0.0
    };

    RunSummary {
        arrived: stats.arrived(),
        served,
        abandoned: stats.abandonments().len() as u64,
        in_system: ctx.in_system,
        elapsed,
        mean_total_time: mean(records.iter().map(|r| r.total_time)),
        max_total_time: max(records.iter().map(|r| r.total_time)),
        throughput,
        stages,
        pools,
        records: records.to_vec(),
    }
}
