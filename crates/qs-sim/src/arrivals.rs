//! `ArrivalGenerator` — spawns entities at sampled intervals.

use serde::{Deserialize, Serialize};

use qs_core::{Delay, EntityId, QsError, QsResult, StreamRng};
use qs_sample::BoxedSampler;

/// How the generator stops.  The two modes are exclusive per run.
///
/// In TOML: `limit = { count = 400 }` or `limit = "until_horizon"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalLimit {
    /// Spawn exactly this many entities (unless the horizon cuts in first).
    Count(u64),
    /// Keep spawning until the run horizon; requires a horizon.
    UntilHorizon,
}

/// Lazy source of arrivals: draw a gap, wait it out, spawn one entity.
pub struct ArrivalGenerator {
    interarrival: BoxedSampler,
    rng:          StreamRng,
    limit:        ArrivalLimit,
    spawned:      u64,
}

impl ArrivalGenerator {
    pub fn new(interarrival: BoxedSampler, rng: StreamRng, limit: ArrivalLimit) -> Self {
        Self { interarrival, rng, limit, spawned: 0 }
    }

    /// Gap before the next arrival, or `None` once the count is reached.
    ///
    /// In `UntilHorizon` mode this never returns `None`; the scheduler's
    /// horizon is what stops the stream.
    pub fn next_gap(&mut self) -> QsResult<Option<Delay>> {
        if matches!(self.limit, ArrivalLimit::Count(n) if self.spawned >= n) {
            return Ok(None);
        }
        self.interarrival.sample_delay(&mut self.rng).map(Some)
    }

    /// Assign the next entity id.
    pub fn spawn(&mut self) -> QsResult<EntityId> {
        let id = u32::try_from(self.spawned)
            .map(EntityId)
            .map_err(|_| QsError::Config("entity id space exhausted".into()))?;
        self.spawned += 1;
        Ok(id)
    }

    /// Entities spawned so far.
    pub fn spawned(&self) -> u64 {
        self.spawned
    }

    pub fn limit(&self) -> ArrivalLimit {
        self.limit
    }
}
