//! Scenario files.
//!
//! A scenario describes one run: seed, horizon, arrivals, pools, and the
//! stage pipeline.  It is the serializable counterpart of [`SimBuilder`].
//!
//! ```toml
//! name    = "two-desk clinic"
//! seed    = 42
//! horizon = 900.0
//!
//! [arrivals]
//! interarrival = { kind = "exponential", mean = 1.8 }
//! limit        = { count = 400 }
//!
//! [[pools]]
//! name     = "registration"
//! capacity = 2
//!
//! [[stages]]
//! name     = "register"
//! pool     = "registration"
//! duration = { kind = "uniform", low = 4.0, high = 6.0 }
//! ```
//!
//! Several scenarios can share a file as `[[scenario]]` tables; see
//! [`ScenarioSet`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use qs_sample::{BoxedSampler, DistributionSpec, NegativeSamples, SampleError};

use crate::{ArrivalLimit, Sim, SimBuilder, SimError, SimResult, StageSpec};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrivalConfig {
    pub interarrival: DistributionSpec,
    pub limit:        ArrivalLimit,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub name:     String,
    pub capacity: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name:     String,
    /// Omit for a transition stage.
    #[serde(default)]
    pub pool:     Option<String>,
    pub duration: DistributionSpec,
    #[serde(default)]
    pub patience: Option<DistributionSpec>,
}

/// One run, as written in a scenario file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_name")]
    pub name:             String,
    pub seed:             u64,
    #[serde(default)]
    pub horizon:          Option<f64>,
    pub arrivals:         ArrivalConfig,
    #[serde(default)]
    pub pools:            Vec<PoolConfig>,
    #[serde(default)]
    pub stages:           Vec<StageConfig>,
    #[serde(default = "default_throughput_scale")]
    pub throughput_scale: f64,
    #[serde(default)]
    pub negative_samples: NegativeSamples,
}

fn default_name() -> String {
    "scenario".to_owned()
}

fn default_throughput_scale() -> f64 {
    1.0
}

impl ScenarioConfig {
    pub fn from_toml_str(s: &str) -> SimResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_path(path: impl AsRef<Path>) -> SimResult<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Build every distribution and fill a [`SimBuilder`].  Pool names and
    /// run-level rules are checked later, by [`SimBuilder::build`].
    pub fn builder(&self) -> SimResult<SimBuilder> {
        let interarrival = distribution("arrivals.interarrival", &self.arrivals.interarrival)?;
        let mut builder = SimBuilder::from_boxed(self.seed, interarrival, self.arrivals.limit)
            .name(self.name.clone())
            .throughput_scale(self.throughput_scale)
            .negative_samples(self.negative_samples);
        if let Some(h) = self.horizon {
            builder = builder.horizon(h);
        }
        for pool in &self.pools {
            builder = builder.pool(pool.name.clone(), pool.capacity);
        }
        for stage in &self.stages {
            builder = builder.stage(stage.to_spec()?);
        }
        Ok(builder)
    }

    pub fn build(&self) -> SimResult<Sim> {
        self.builder()?.build()
    }
}

impl StageConfig {
    fn to_spec(&self) -> SimResult<StageSpec> {
        let duration = distribution(&format!("stages.{}.duration", self.name), &self.duration)?;
        let mut spec = StageSpec {
            name:     self.name.clone(),
            pool:     self.pool.clone(),
            duration,
            patience: None,
        };
        if let Some(p) = &self.patience {
            spec.patience = Some(distribution(&format!("stages.{}.patience", self.name), p)?);
        }
        Ok(spec)
    }
}

fn distribution(what: &str, spec: &DistributionSpec) -> SimResult<BoxedSampler> {
    spec.build().map_err(|source: SampleError| SimError::Distribution {
        what: what.to_owned(),
        source,
    })
}

/// Several scenarios in one file, as `[[scenario]]` tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSet {
    #[serde(default)]
    pub scenario: Vec<ScenarioConfig>,
}

impl ScenarioSet {
    pub fn from_toml_str(s: &str) -> SimResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_toml_path(path: impl AsRef<Path>) -> SimResult<Self> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }
}
