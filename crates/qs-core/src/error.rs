//! Engine error type.
//!
//! Sub-crates define their own error enums and either convert into `QsError`
//! or wrap it as one variant (`qs-sim` does the latter).

use thiserror::Error;

use crate::{PoolId, SimTime};

/// Failures shared by every layer of the engine.
///
/// All of them are fatal for the run that raised them: nothing is clamped or
/// retried behind the caller's back.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QsError {
    /// A pool was declared with `capacity <= 0`.
    #[error("invalid capacity {0}: pools need at least one slot")]
    InvalidCapacity(i64),

    /// A timeout or sampled duration was negative or not finite.
    #[error("invalid delay {0}: delays must be finite and non-negative")]
    InvalidDelay(f64),

    /// A point in simulated time was negative or not finite.
    #[error("invalid simulated time {0}")]
    InvalidTime(f64),

    /// A release was attempted with a grant the pool does not hold.
    #[error("grant {grant} is not held by pool {pool}")]
    NotHeld { pool: PoolId, grant: u64 },

    /// The clock was asked to move backwards.
    #[error("clock regression from {from} to {to}")]
    ClockRegression { from: SimTime, to: SimTime },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `qs-*` crates.
pub type QsResult<T> = Result<T, QsError>;
