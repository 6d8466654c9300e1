//! Fluent builder for constructing a [`Sim`].

use qs_core::{SimTime, StreamRng};
use qs_resource::PoolRegistry;
use qs_sample::{BoxedSampler, NegativeSamples, Sampler};

use crate::stage::Stage;
use crate::{ArrivalGenerator, ArrivalLimit, Pipeline, Sim, SimError, SimResult, StageSpec};

/// Sampling stream of the arrival generator.  Stage `i` draws durations from
/// stream `1 + 2i` and patience from stream `2 + 2i`.
const ARRIVAL_STREAM: u64 = 0;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - run seed
/// - interarrival sampler
/// - [`ArrivalLimit`]: a fixed count, or `UntilHorizon` (needs `.horizon`)
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                        |
/// |--------------------------|--------------------------------|
/// | `.name(s)`               | `"scenario"`                   |
/// | `.horizon(t)`            | none: run until events run out |
/// | `.pool(name, capacity)`  | no pools                       |
/// | `.stage(spec)`           | empty pipeline                 |
/// | `.throughput_scale(k)`   | `1.0`                          |
/// | `.negative_samples(p)`   | `NegativeSamples::Reject`      |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(7, Fixed(1.0), ArrivalLimit::Count(10))
///     .pool("desk", 1)
///     .stage(StageSpec::service("serve", "desk", Fixed(3.0)))
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    seed:             u64,
    interarrival:     BoxedSampler,
    limit:            ArrivalLimit,
    name:             String,
    horizon:          Option<f64>,
    pools:            Vec<(String, i64)>,
    stages:           Vec<StageSpec>,
    throughput_scale: f64,
    negative_samples: NegativeSamples,
}

impl SimBuilder {
    /// Create a builder with all required inputs.
    pub fn new(seed: u64, interarrival: impl Sampler + 'static, limit: ArrivalLimit) -> Self {
        Self::from_boxed(seed, Box::new(interarrival), limit)
    }

    pub(crate) fn from_boxed(seed: u64, interarrival: BoxedSampler, limit: ArrivalLimit) -> Self {
        Self {
            seed,
            interarrival,
            limit,
            name:             "scenario".to_owned(),
            horizon:          None,
            pools:            Vec::new(),
            stages:           Vec::new(),
            throughput_scale: 1.0,
            negative_samples: NegativeSamples::default(),
        }
    }

    /// Label used in logs and summaries.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Stop the run at simulated time `t`.  Events due exactly at `t` still run.
    pub fn horizon(mut self, t: f64) -> Self {
        self.horizon = Some(t);
        self
    }

    /// Declare a pool.  Capacity is checked by [`build`][Self::build].
    pub fn pool(mut self, name: impl Into<String>, capacity: i64) -> Self {
        self.pools.push((name.into(), capacity));
        self
    }

    /// Append a stage to the pipeline.
    pub fn stage(mut self, spec: StageSpec) -> Self {
        self.stages.push(spec);
        self
    }

    /// Multiplier applied to `served / elapsed` in the summary, e.g. `60.0`
    /// to report per hour when time is in minutes.
    pub fn throughput_scale(mut self, scale: f64) -> Self {
        self.throughput_scale = scale;
        self
    }

    pub fn negative_samples(mut self, policy: NegativeSamples) -> Self {
        self.negative_samples = policy;
        self
    }

    /// Validate inputs, resolve pool names, seed every stream, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        // ── Validate run-level inputs ─────────────────────────────────────
        let horizon = self.horizon.map(SimTime::new).transpose()?;
        if self.limit == ArrivalLimit::UntilHorizon && horizon.is_none() {
            return Err(SimError::MissingHorizon);
        }
        if !(self.throughput_scale.is_finite() && self.throughput_scale > 0.0) {
            return Err(SimError::Config(format!(
                "throughput_scale must be positive, got {}",
                self.throughput_scale
            )));
        }
        if self.stages.len() > usize::from(u16::MAX) {
            return Err(SimError::Config(format!(
                "{} stages exceeds the limit of {}",
                self.stages.len(),
                u16::MAX
            )));
        }

        // ── Declare pools ─────────────────────────────────────────────────
        let mut pools = PoolRegistry::new();
        for (name, capacity) in &self.pools {
            pools.declare(name, *capacity)?;
        }

        // ── Resolve stages and assign their streams ───────────────────────
        let policy = self.negative_samples;
        let mut stages = Vec::with_capacity(self.stages.len());
        for (i, spec) in self.stages.into_iter().enumerate() {
            let pool = spec.pool.as_deref().map(|name| pools.resolve(name)).transpose()?;
            if pool.is_none() && spec.patience.is_some() {
                return Err(SimError::Config(format!(
                    "stage `{}` has patience but no pool to wait for",
                    spec.name
                )));
            }
            let i = i as u64;
            let duration_rng = StreamRng::new(self.seed, 1 + 2 * i);
            let patience = spec
                .patience
                .map(|p| (policy.apply(p), StreamRng::new(self.seed, 2 + 2 * i)));
            stages.push(Stage::new(
                spec.name,
                pool,
                policy.apply(spec.duration),
                duration_rng,
                patience,
            ));
        }

        let arrivals = ArrivalGenerator::new(
            policy.apply(self.interarrival),
            StreamRng::new(self.seed, ARRIVAL_STREAM),
            self.limit,
        );

        Ok(Sim::new(
            self.name,
            pools,
            Pipeline::new(stages),
            arrivals,
            horizon,
            self.throughput_scale,
        ))
    }
}
