//! What to do with a negative draw.
//!
//! The engine's default is to reject it (`InvalidDelay`).  Clamping to zero
//! is available, but only when a scenario asks for it explicitly.

use serde::{Deserialize, Serialize};

use qs_core::StreamRng;

use crate::{BoxedSampler, Sampler};

/// Scenario-level choice for negative samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeSamples {
    /// Surface negative draws as `InvalidDelay` and stop the run.
    #[default]
    Reject,
    /// Replace negative draws with `0.0`.
    Clamp,
}

impl NegativeSamples {
    /// Apply the policy to a sampler.
    pub fn apply(self, sampler: BoxedSampler) -> BoxedSampler {
        match self {
            NegativeSamples::Reject => sampler,
            NegativeSamples::Clamp  => Box::new(Clamped(sampler)),
        }
    }
}

/// Floors every draw of `S` at zero.  NaN draws pass through unchanged so
/// they still fail validation.
pub struct Clamped<S>(pub S);

impl<S: Sampler> Sampler for Clamped<S> {
    fn sample(&mut self, rng: &mut StreamRng) -> f64 {
        let x = self.0.sample(rng);
        if x < 0.0 { 0.0 } else { x }
    }
}
