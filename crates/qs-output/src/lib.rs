//! `qs-output` — output writers for qsim runs.
//!
//! | Backend | Files created                                      |
//! |---------|----------------------------------------------------|
//! | CSV     | `journeys.csv`, `stages.csv`, `summary.csv`        |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`RecordOutputObserver`], which implements `qs_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use qs_output::{CsvWriter, RecordOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = RecordOutputObserver::new(writer);
//! let summary = sim.run(&mut obs)?;
//! obs.write_summary(&summary)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::RecordOutputObserver;
pub use row::{JourneyRow, Outcome, PoolRow, StageRow};
pub use writer::OutputWriter;
