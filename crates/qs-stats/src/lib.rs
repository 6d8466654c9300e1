//! `qs-stats` — passive aggregation of what happened during a run.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`record`]    | `StageRecord`, `MeasurementRecord`, `AbandonmentRecord`        |
//! | [`collector`] | `StatsCollector` — append-only sink owned by one run           |
//! | [`summary`]   | `RunSummary`, `StageSummary`, `PoolSummary`, `SummaryContext`  |
//!
//! Records are appended as they happen and never edited.  Every aggregate
//! (means, utilization, throughput) is derived on demand by
//! [`StatsCollector::summarize`], so a summary taken mid-run and one taken at
//! the end are computed the same way from the same raw data.

pub mod collector;
pub mod record;
pub mod summary;


pub use collector::StatsCollector;
pub use record::{AbandonmentRecord, MeasurementRecord, StageRecord};
pub use summary::{OpenHold, PoolSnapshot, PoolSummary, RunSummary, StageInfo, StageSummary, SummaryContext};
