//! Stages and the pipeline every entity walks through.

use qs_core::{Delay, PoolId, QsResult, StreamRng};
use qs_sample::{BoxedSampler, Sampler};
use qs_stats::StageInfo;

// ── StageSpec (unresolved, as supplied by the caller) ─────────────────────────

/// A stage as described by the caller, before pool names are resolved.
pub struct StageSpec {
    pub(crate) name:     String,
    pub(crate) pool:     Option<String>,
    pub(crate) duration: BoxedSampler,
    pub(crate) patience: Option<BoxedSampler>,
}

impl StageSpec {
    /// Acquire one slot of `pool`, hold it for a `duration` draw, release.
    pub fn service(
        name:     impl Into<String>,
        pool:     impl Into<String>,
        duration: impl Sampler + 'static,
    ) -> Self {
        Self {
            name:     name.into(),
            pool:     Some(pool.into()),
            duration: Box::new(duration),
            patience: None,
        }
    }

    /// An untimed transition (walking to the waiting area): a plain timeout
    /// bound to no pool.
    pub fn transition(name: impl Into<String>, duration: impl Sampler + 'static) -> Self {
        Self {
            name:     name.into(),
            pool:     None,
            duration: Box::new(duration),
            patience: None,
        }
    }

    /// Give up waiting for the pool after a `patience` draw.  Only valid on
    /// service stages; the builder rejects it on transitions.
    pub fn with_patience(mut self, patience: impl Sampler + 'static) -> Self {
        self.patience = Some(Box::new(patience));
        self
    }
}

// ── Stage (resolved) ──────────────────────────────────────────────────────────

/// One step of the journey, bound to at most one declared pool.
pub struct Stage {
    name:         String,
    pool:         Option<PoolId>,
    duration:     BoxedSampler,
    duration_rng: StreamRng,
    patience:     Option<(BoxedSampler, StreamRng)>,
}

impl Stage {
    pub(crate) fn new(
        name:         String,
        pool:         Option<PoolId>,
        duration:     BoxedSampler,
        duration_rng: StreamRng,
        patience:     Option<(BoxedSampler, StreamRng)>,
    ) -> Self {
        Self { name, pool, duration, duration_rng, patience }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The pool this stage acquires, or `None` for a transition.
    pub fn pool(&self) -> Option<PoolId> {
        self.pool
    }

    pub fn has_patience(&self) -> bool {
        self.patience.is_some()
    }

    /// Draw a hold (or transition) duration from this stage's stream.
    pub(crate) fn sample_hold(&mut self) -> QsResult<Delay> {
        self.duration.sample_delay(&mut self.duration_rng)
    }

    /// Draw a patience if the stage has one.
    pub(crate) fn sample_patience(&mut self) -> QsResult<Option<Delay>> {
        self.patience
            .as_mut()
            .map(|(sampler, rng)| sampler.sample_delay(rng))
            .transpose()
    }
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

/// The ordered stages of a run.  Its shape is fixed once the run is built.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Pipeline {
    pub(crate) fn new(stages: Vec<Stage>) -> Self {
        Self { stages }
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.stages.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Stage> {
        self.stages.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }

    pub fn infos(&self) -> Vec<StageInfo> {
        self.stages
            .iter()
            .map(|s| StageInfo { name: s.name.clone(), pool: s.pool })
            .collect()
    }
}
