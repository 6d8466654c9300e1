//! Simulation observer trait for progress reporting and data collection.

use qs_core::{EntityId, PoolId, SimTime};
use qs_resource::PoolRegistry;
use qs_stats::{AbandonmentRecord, MeasurementRecord, StageRecord};

use crate::SimEvent;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// event loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { every: u64, seen: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_complete(&mut self, record: &MeasurementRecord) {
///         self.seen += 1;
///         if self.seen % self.every == 0 {
///             println!("{}: {} served", record.completion, self.seen);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after each event is popped, before it is dispatched.
    fn on_event(&mut self, _now: SimTime, _event: &SimEvent) {}

    /// Called when a new entity enters the system.
    fn on_arrival(&mut self, _entity: EntityId, _now: SimTime) {}

    /// Called when `entity` is granted a slot of `pool` after waiting `wait`.
    fn on_grant(&mut self, _pool: PoolId, _entity: EntityId, _now: SimTime, _wait: f64) {}

    /// Called when an entity leaves a stage.
    fn on_stage_complete(&mut self, _record: &StageRecord) {}

    /// Called when an entity finishes its last stage.
    fn on_complete(&mut self, _record: &MeasurementRecord) {}

    /// Called when an entity gives up waiting in a queue.
    fn on_abandon(&mut self, _record: &AbandonmentRecord) {}

    /// Called after each event has been fully dispatched.
    ///
    /// Provides read-only access to every pool so that monitors can check
    /// occupancy without the sim needing to know what they record.
    fn on_step(&mut self, _now: SimTime, _pools: &PoolRegistry) {}

    /// Called once after the run stops.
    fn on_sim_end(&mut self, _now: SimTime) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
