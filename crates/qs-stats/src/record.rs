//! Plain measurement records.

use serde::Serialize;

use qs_core::{EntityId, PoolId, SimTime, StageId};

/// One completed pass through one stage.
///
/// For a service stage, `wait` is `granted_at - enqueued_at` and `hold` is
/// the sampled service time.  For a transition (no pool) stage, `wait` is
/// zero and `hold` is the sampled delay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageRecord {
    pub entity:               EntityId,
    pub stage:                StageId,
    pub pool:                 Option<PoolId>,
    pub enqueued_at:          SimTime,
    pub granted_at:           SimTime,
    pub released_at:          SimTime,
    pub wait:                 f64,
    pub hold:                 f64,
    /// Entities already waiting in the pool's queue when this entity made
    /// its request.  Always 0 for transition stages.
    pub queue_len_at_enqueue: usize,
}

/// The full journey of one served entity, emitted when it leaves the system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    pub entity:     EntityId,
    pub arrival:    SimTime,
    pub completion: SimTime,
    /// `completion - arrival`.
    pub total_time: f64,
    pub stages:     Vec<StageRecord>,
}

impl MeasurementRecord {
    /// Sum of waits across all stages.
    pub fn total_wait(&self) -> f64 {
        self.stages.iter().map(|s| s.wait).sum()
    }
}

/// An entity that gave up waiting for a pool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbandonmentRecord {
    pub entity:       EntityId,
    pub stage:        StageId,
    pub pool:         PoolId,
    pub arrival:      SimTime,
    pub enqueued_at:  SimTime,
    pub abandoned_at: SimTime,
    pub waited:       f64,
}
