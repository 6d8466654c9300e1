//! Plain data row types written by output backends.

use qs_stats::{AbandonmentRecord, MeasurementRecord, PoolSummary, StageRecord};

/// How a journey ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Served,
    Abandoned,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Served    => "served",
            Outcome::Abandoned => "abandoned",
        }
    }
}

/// One entity that left the system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JourneyRow {
    pub entity:     u32,
    pub outcome:    Outcome,
    pub arrival:    f64,
    pub left_at:    f64,
    pub total_time: f64,
    /// Summed queue waits; for an abandoned entity, includes the wait it gave up on.
    pub total_wait: f64,
    /// Stages completed before leaving.
    pub stages:     u32,
}

impl From<&MeasurementRecord> for JourneyRow {
    fn from(r: &MeasurementRecord) -> Self {
        Self {
            entity:     r.entity.0,
            outcome:    Outcome::Served,
            arrival:    r.arrival.as_f64(),
            left_at:    r.completion.as_f64(),
            total_time: r.total_time,
            total_wait: r.total_wait(),
            stages:     r.stages.len() as u32,
        }
    }
}

impl JourneyRow {
    /// Row for an entity that reneged.  `prior_wait` is the wait accumulated
    /// in the stages it completed before giving up.
    pub fn abandoned(r: &AbandonmentRecord, prior_wait: f64, stages: u32) -> Self {
        Self {
            entity:     r.entity.0,
            outcome:    Outcome::Abandoned,
            arrival:    r.arrival.as_f64(),
            left_at:    r.abandoned_at.as_f64(),
            total_time: r.abandoned_at.since(r.arrival),
            total_wait: prior_wait + r.waited,
            stages,
        }
    }
}

/// One completed stage pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageRow {
    pub entity:               u32,
    pub stage:                u16,
    /// `None` for transitions.
    pub pool:                 Option<u32>,
    pub enqueued_at:          f64,
    pub granted_at:           f64,
    pub released_at:          f64,
    pub wait:                 f64,
    pub hold:                 f64,
    pub queue_len_at_enqueue: u64,
}

impl From<&StageRecord> for StageRow {
    fn from(r: &StageRecord) -> Self {
        Self {
            entity:               r.entity.0,
            stage:                r.stage.0,
            pool:                 r.pool.map(|p| p.0),
            enqueued_at:          r.enqueued_at.as_f64(),
            granted_at:           r.granted_at.as_f64(),
            released_at:          r.released_at.as_f64(),
            wait:                 r.wait,
            hold:                 r.hold,
            queue_len_at_enqueue: r.queue_len_at_enqueue as u64,
        }
    }
}

/// End-of-run figures for one pool.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolRow {
    pub pool:               u32,
    pub name:               String,
    pub capacity:           u32,
    pub grants:             u64,
    pub busy_time:          f64,
    pub utilization_pct:    f64,
    pub time_avg_queue_len: f64,
    pub max_queue_len:      u64,
}

impl From<&PoolSummary> for PoolRow {
    fn from(p: &PoolSummary) -> Self {
        Self {
            pool:               p.pool.0,
            name:               p.name.clone(),
            capacity:           p.capacity,
            grants:             p.grants,
            busy_time:          p.busy_time,
            utilization_pct:    p.utilization_pct,
            time_avg_queue_len: p.time_avg_queue_len,
            max_queue_len:      p.max_queue_len as u64,
        }
    }
}
