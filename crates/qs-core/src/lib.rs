//! `qs-core` — foundational types for the `qsim` discrete-event engine.
//!
//! This crate is a dependency of every other `qs-*` crate.  It intentionally
//! has no `qs-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `PoolId`, `StageId`                       |
//! | [`time`]        | `SimTime`, `Delay`, `SimClock`                        |
//! | [`rng`]         | `StreamRng` (one per sampling stream)                 |
//! | [`error`]       | `QsError`, `QsResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{QsError, QsResult};
pub use ids::{EntityId, PoolId, StageId};
pub use rng::StreamRng;
pub use time::{Delay, SimClock, SimTime};
