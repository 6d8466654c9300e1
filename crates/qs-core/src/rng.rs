//! Deterministic per-stream RNG wrapper.
//!
//! # Determinism strategy
//!
//! Every independent source of randomness in a run (the interarrival gaps,
//! each stage's service times, each stage's patience) gets its own
//! `SmallRng` seeded by:
//!
//!   seed = run_seed XOR (stream_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream ids uniformly across the seed space.
//! Adding a stage at the end of a pipeline therefore leaves the arrival
//! sequence and the earlier stages' draws untouched.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// One deterministic sampling stream.
///
/// Not `Clone`: two copies of a stream would replay the same draws.
pub struct StreamRng(SmallRng);

impl StreamRng {
    /// Seed deterministically from the run seed and a stream id.
    pub fn new(run_seed: u64, stream: u64) -> Self {
        let seed = run_seed ^ stream.wrapping_add(1).wrapping_mul(MIXING_CONSTANT);
        StreamRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand`/`rand_distr`
    /// distribution types (`rng.inner().sample(...)`).
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.  Used by the uniform sampler.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl std::fmt::Debug for StreamRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StreamRng")
    }
}
