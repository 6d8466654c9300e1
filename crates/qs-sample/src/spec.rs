//! Serializable distribution descriptions, as written in scenario files.
//!
//! ```toml
//! interarrival = { kind = "exponential", mean = 1.8 }
//! duration     = { kind = "uniform", low = 4.0, high = 6.0 }
//! ```

use serde::{Deserialize, Serialize};

use crate::{BoxedSampler, Exponential, Fixed, Normal, SampleError, SampleResult, Uniform};

/// A distribution plus its parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DistributionSpec {
    Fixed { value: f64 },
    Uniform { low: f64, high: f64 },
    Exponential { mean: f64 },
    Normal { mean: f64, std_dev: f64 },
}

impl DistributionSpec {
    /// Validate parameters without building anything.
    pub fn validate(&self) -> SampleResult<()> {
        self.build().map(|_| ())
    }

    /// Build the sampler this spec describes.
    pub fn build(&self) -> SampleResult<BoxedSampler> {
        Ok(match *self {
            DistributionSpec::Fixed { value } => {
                if !value.is_finite() {
                    return Err(SampleError::InvalidParameter {
                        kind:   "fixed",
                        reason: format!("value must be finite, got {value}"),
                    });
                }
                Box::new(Fixed(value))
            }
            DistributionSpec::Uniform { low, high }    => Box::new(Uniform::new(low, high)?),
            DistributionSpec::Exponential { mean }     => Box::new(Exponential::with_mean(mean)?),
            DistributionSpec::Normal { mean, std_dev } => Box::new(Normal::new(mean, std_dev)?),
        })
    }
}
