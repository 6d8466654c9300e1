//! Standard duration distributions.
//!
//! Exponential gaps model Poisson arrivals; uniform draws model bounded
//! service times (a registration desk that takes 4–6 minutes); `Fixed` gives
//! fully deterministic runs; `Normal` exists for service times that cluster
//! around a mean and is the one distribution that can produce negative draws.

use rand_distr::{Distribution, Exp};

use qs_core::StreamRng;

use crate::{SampleError, SampleResult, Sampler};

// ── Fixed ─────────────────────────────────────────────────────────────────────

/// Always returns the same value.  Consumes no randomness.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fixed(pub f64);

impl Sampler for Fixed {
    #[inline]
    fn sample(&mut self, _rng: &mut StreamRng) -> f64 {
        self.0
    }
}

// ── Uniform ───────────────────────────────────────────────────────────────────

/// Uniform on the closed interval `[low, high]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Uniform {
    low:  f64,
    high: f64,
}

impl Uniform {
    pub fn new(low: f64, high: f64) -> SampleResult<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(SampleError::InvalidParameter {
                kind:   "uniform",
                reason: format!("need finite low <= high, got [{low}, {high}]"),
            });
        }
        Ok(Self { low, high })
    }
}

impl Sampler for Uniform {
    fn sample(&mut self, rng: &mut StreamRng) -> f64 {
        rng.gen_range(self.low..=self.high)
    }
}

// ── Exponential ───────────────────────────────────────────────────────────────

/// Exponential with the given mean (rate `1 / mean`).
#[derive(Clone, Copy, Debug)]
pub struct Exponential {
    dist: Exp<f64>,
    mean: f64,
}

impl Exponential {
    pub fn with_mean(mean: f64) -> SampleResult<Self> {
        if !(mean.is_finite() && mean > 0.0) {
            return Err(SampleError::InvalidParameter {
                kind:   "exponential",
                reason: format!("mean must be finite and positive, got {mean}"),
            });
        }
        let dist = Exp::new(1.0 / mean).map_err(|e| SampleError::InvalidParameter {
            kind:   "exponential",
            reason: e.to_string(),
        })?;
        Ok(Self { dist, mean })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }
}

impl Sampler for Exponential {
    fn sample(&mut self, rng: &mut StreamRng) -> f64 {
        self.dist.sample(rng.inner())
    }
}

// ── Normal ────────────────────────────────────────────────────────────────────

/// Gaussian service time.  Draws below zero are possible; pair with
/// [`Clamped`][crate::Clamped] if the scenario wants them floored.
#[derive(Clone, Copy, Debug)]
pub struct Normal(rand_distr::Normal<f64>);

impl Normal {
    pub fn new(mean: f64, std_dev: f64) -> SampleResult<Self> {
        if !mean.is_finite() {
            return Err(SampleError::InvalidParameter {
                kind:   "normal",
                reason: format!("mean must be finite, got {mean}"),
            });
        }
        if !(std_dev.is_finite() && std_dev >= 0.0) {
            return Err(SampleError::InvalidParameter {
                kind:   "normal",
                reason: format!("std_dev must be finite and non-negative, got {std_dev}"),
            });
        }
        rand_distr::Normal::new(mean, std_dev)
            .map(Normal)
            .map_err(|e| SampleError::InvalidParameter {
                kind:   "normal",
                reason: e.to_string(),
            })
    }
}

impl Sampler for Normal {
    fn sample(&mut self, rng: &mut StreamRng) -> f64 {
        self.0.sample(rng.inner())
    }
}
