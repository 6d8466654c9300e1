//! The `Sim` struct and its event loop.

use std::collections::BTreeMap;

use qs_core::{Delay, EntityId, SimTime, StageId};
use qs_resource::{Grant, PoolRegistry, Request};
use qs_schedule::Scheduler;
use qs_stats::{
    AbandonmentRecord, OpenHold, PoolSnapshot, RunSummary, StageRecord, StatsCollector,
    SummaryContext,
};
use tracing::{debug, info};

use crate::process::Phase;
use crate::{ArrivalGenerator, Pipeline, Process, SimError, SimObserver, SimResult};

// ── Events ────────────────────────────────────────────────────────────────────

/// Everything the scheduler can wake up for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// The arrival generator's gap elapsed: spawn the next entity.
    Arrival,
    /// Step `EntityId`'s state machine.
    Resume(EntityId),
    /// `EntityId`'s patience ran out while queued.
    Renege(EntityId),
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim` owns every piece of run state and drives the event loop:
///
/// 1. **Arrival**: spawn a [`Process`], schedule the next arrival, and
///    schedule the new process to start at the current time.
/// 2. **Resume**: run the process to its next suspension point.  Requests,
///    releases and stage records all happen inside this step.
/// 3. **Renege**: withdraw a still-queued process from its pool and end it
///    abandoned.
///
/// Processes that are not done live in a `BTreeMap` keyed by `EntityId`; a
/// process is taken out while it is stepped so that a release can hand its
/// slot straight to another process in the same map.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    name:             String,
    scheduler:        Scheduler<SimEvent>,
    pools:            PoolRegistry,
    pipeline:         Pipeline,
    arrivals:         ArrivalGenerator,
    processes:        BTreeMap<EntityId, Process>,
    stats:            StatsCollector,
    horizon:          Option<SimTime>,
    throughput_scale: f64,
    started:          bool,
}

impl Sim {
    pub(crate) fn new(
        name:             String,
        pools:            PoolRegistry,
        pipeline:         Pipeline,
        arrivals:         ArrivalGenerator,
        horizon:          Option<SimTime>,
        throughput_scale: f64,
    ) -> Self {
        Self {
            name,
            scheduler: Scheduler::new(),
            pools,
            pipeline,
            arrivals,
            processes: BTreeMap::new(),
            stats: StatsCollector::new(),
            horizon,
            throughput_scale,
            started: false,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until the event set is empty or the horizon is reached, then
    /// summarize.
    ///
    /// Events due exactly at the horizon still run; the clock then moves to
    /// the horizon.  Calls observer hooks for every event.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunSummary> {
        self.start()?;
        self.drain(self.horizon, observer)?;
        let now = self.now();
        observer.on_sim_end(now);
        info!(
            scenario  = %self.name,
            time      = now.as_f64(),
            events    = self.scheduler.processed(),
            arrived   = self.stats.arrived(),
            served    = self.stats.served(),
            abandoned = self.stats.abandonments().len(),
            in_system = self.processes.len(),
            "Run complete"
        );
        Ok(self.summary())
    }

    /// Process every event due at or before `until` (capped at the horizon)
    /// and move the clock there.  Returns the number of events processed.
    ///
    /// Useful for tests and incremental stepping.  A later
    /// [`run`][Self::run] carries on from where this left off.
    pub fn run_until<O: SimObserver>(&mut self, until: f64, observer: &mut O) -> SimResult<u64> {
        let mut until = SimTime::new(until)?;
        if let Some(h) = self.horizon {
            until = until.min(h);
        }
        self.start()?;
        self.drain(Some(until), observer)
    }

    /// Aggregate everything recorded so far, treating the current time as
    /// the end of the run.
    pub fn summary(&self) -> RunSummary {
        let now = self.now();
        let stages = self.pipeline.infos();
        let pools: Vec<PoolSnapshot> = self
            .pools
            .iter()
            .map(|p| PoolSnapshot {
                id:                 p.id(),
                name:               p.name().to_owned(),
                capacity:           p.capacity(),
                grants:             p.grants_issued(),
                time_avg_queue_len: p.monitor().time_average(now),
                max_queue_len:      p.monitor().max_len(),
            })
            .collect();
        let open_holds: Vec<OpenHold> =
            self.processes.values().filter_map(Process::open_hold).collect();

        self.stats.summarize(&SummaryContext {
            elapsed:          now,
            stages:           &stages,
            pools:            &pools,
            open_holds:       &open_holds,
            in_system:        self.processes.len() as u64,
            throughput_scale: self.throughput_scale,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn pools(&self) -> &PoolRegistry {
        &self.pools
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    pub fn arrivals(&self) -> &ArrivalGenerator {
        &self.arrivals
    }

    /// A process that has not finished yet.
    pub fn process(&self, id: EntityId) -> Option<&Process> {
        self.processes.get(&id)
    }

    /// Entities still in the system (queued, holding, or in transit).
    pub fn in_system(&self) -> usize {
        self.processes.len()
    }

    /// Events waiting to fire.
    pub fn pending_events(&self) -> usize {
        self.scheduler.pending()
    }

    // ── Event dispatch ────────────────────────────────────────────────────

    fn start(&mut self) -> SimResult<()> {
        if self.started {
            return Ok(());
        }
        self.started = true;
        if let Some(gap) = self.arrivals.next_gap()? {
            self.scheduler.schedule_in(gap, SimEvent::Arrival);
        }
        info!(
            scenario = %self.name,
            pools    = self.pools.len(),
            stages   = self.pipeline.len(),
            horizon  = self.horizon.map(SimTime::as_f64),
            "Starting run"
        );
        Ok(())
    }

    /// Dispatch every event due at or before `limit`, then close the clock
    /// at `limit`.  Same loop as `Scheduler::run_until`, which cannot be
    /// used here: its handler gets the scheduler, but dispatching needs the
    /// whole `Sim` that owns it.
    fn drain<O: SimObserver>(&mut self, limit: Option<SimTime>, observer: &mut O) -> SimResult<u64> {
        let before = self.scheduler.processed();
        while let Some(event) = self.scheduler.next_due(limit)? {
            self.dispatch(event, observer)?;
        }
        if let Some(t) = limit {
            self.scheduler.close_at(t)?;
        }
        Ok(self.scheduler.processed() - before)
    }

    fn dispatch<O: SimObserver>(&mut self, event: SimEvent, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        observer.on_event(now, &event);
        match event {
            SimEvent::Arrival => self.on_arrival(observer)?,
            SimEvent::Resume(id) => self.resume(id, observer)?,
            SimEvent::Renege(id) => self.on_renege(id, observer)?,
        }
        observer.on_step(now, &self.pools);
        Ok(())
    }

    fn on_arrival<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        let id = self.arrivals.spawn()?;
        self.stats.record_arrival();
        observer.on_arrival(id, now);

        let mut process = Process::new(id, now);
        let key = self.scheduler.schedule_in(Delay::ZERO, SimEvent::Resume(id));
        process.wake(Phase::Ready, key);
        self.processes.insert(id, process);

        if let Some(gap) = self.arrivals.next_gap()? {
            self.scheduler.schedule_in(gap, SimEvent::Arrival);
        }
        debug!(entity = id.0, time = now.as_f64(), "Arrival");
        Ok(())
    }

    fn resume<O: SimObserver>(&mut self, id: EntityId, observer: &mut O) -> SimResult<()> {
        let Some(mut process) = self.processes.remove(&id) else {
            return Err(SimError::Inconsistent(format!("resume for unknown {id}")));
        };
        let result = self.step(&mut process, observer);
        if !process.is_done() {
            self.processes.insert(id, process);
        }
        result
    }

    /// Advance `process` until it suspends or finishes.
    fn step<O: SimObserver>(&mut self, process: &mut Process, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        let entity = process.id();
        loop {
            let index = process.stage_index();
            if index == self.pipeline.len() {
                let record = process.finish(now);
                debug!(entity = entity.0, total = record.total_time, "Served");
                observer.on_complete(&record);
                self.stats.record_completion(record);
                return Ok(());
            }
            let stage_id = stage_id(index);
            let Some(stage) = self.pipeline.get_mut(index) else {
                return Err(SimError::Inconsistent(format!("{entity} past stage {index}")));
            };

            match process.take_phase() {
                Phase::Ready => match stage.pool() {
                    Some(pool) => {
                        let queue_len = self.pools[pool].queue_length();
                        match self.pools[pool].request(entity, now) {
                            Request::Granted(grant) => {
                                process.phase = Phase::Granted { grant, enqueued_at: now, queue_len };
                            }
                            Request::Queued { .. } => {
                                let renege = stage
                                    .sample_patience()?
                                    .map(|p| self.scheduler.schedule_in(p, SimEvent::Renege(entity)));
                                let phase = Phase::Queued { pool, enqueued_at: now, queue_len, renege };
                                process.suspend(phase, None);
                                return Ok(());
                            }
                        }
                    }
                    None => {
                        let delay = stage.sample_hold()?;
                        let key = self.scheduler.schedule_in(delay, SimEvent::Resume(entity));
                        process.suspend(Phase::Delaying { started_at: now }, Some(key));
                        return Ok(());
                    }
                },

                Phase::Granted { grant, enqueued_at, queue_len } => {
                    observer.on_grant(grant.pool(), entity, now, now.since(enqueued_at));
                    let hold = stage.sample_hold()?;
                    let key = self.scheduler.schedule_in(hold, SimEvent::Resume(entity));
                    process.suspend(Phase::Holding { grant, enqueued_at, queue_len }, Some(key));
                    return Ok(());
                }

                Phase::Holding { grant, enqueued_at, queue_len } => {
                    let pool = grant.pool();
                    let granted_at = grant.granted_at();
                    if let Some(next) = self.pools[pool].release(grant, now)? {
                        self.hand_over(next)?;
                    }
                    let record = StageRecord {
                        entity,
                        stage: stage_id,
                        pool: Some(pool),
                        enqueued_at,
                        granted_at,
                        released_at: now,
                        wait: granted_at.since(enqueued_at),
                        hold: now.since(granted_at),
                        queue_len_at_enqueue: queue_len,
                    };
                    self.close_stage(process, record, observer);
                }

                Phase::Delaying { started_at } => {
                    let record = StageRecord {
                        entity,
                        stage: stage_id,
                        pool: None,
                        enqueued_at: started_at,
                        granted_at: started_at,
                        released_at: now,
                        wait: 0.0,
                        hold: now.since(started_at),
                        queue_len_at_enqueue: 0,
                    };
                    self.close_stage(process, record, observer);
                }

                Phase::Queued { pool, .. } => {
                    return Err(SimError::Inconsistent(format!(
                        "{entity} resumed while queued at {pool}"
                    )));
                }
            }
        }
    }

    fn close_stage<O: SimObserver>(
        &mut self,
        process:  &mut Process,
        record:   StageRecord,
        observer: &mut O,
    ) {
        observer.on_stage_complete(&record);
        self.stats.record_stage(record.clone());
        process.complete_stage(record);
    }

    /// Give a slot freed by a release to the waiter it was granted to, and
    /// schedule that waiter to resume now.
    fn hand_over(&mut self, grant: Grant) -> SimResult<()> {
        let entity = grant.entity();
        let Some(waiter) = self.processes.get_mut(&entity) else {
            return Err(SimError::Inconsistent(format!("grant for unknown {entity}")));
        };
        let Phase::Queued { enqueued_at, queue_len, renege, .. } = waiter.take_phase() else {
            return Err(SimError::Inconsistent(format!("grant for {entity} not queued")));
        };
        if let Some(key) = renege {
            self.scheduler.cancel(key);
        }
        let key = self.scheduler.schedule_in(Delay::ZERO, SimEvent::Resume(entity));
        waiter.wake(Phase::Granted { grant, enqueued_at, queue_len }, key);
        Ok(())
    }

    fn on_renege<O: SimObserver>(&mut self, id: EntityId, observer: &mut O) -> SimResult<()> {
        let now = self.now();
        let Some(process) = self.processes.get(&id) else {
            return Err(SimError::Inconsistent(format!("renege for unknown {id}")));
        };
        let Phase::Queued { pool, enqueued_at, .. } = process.phase else {
            return Err(SimError::Inconsistent(format!("renege for {id} not queued")));
        };
        if !self.pools[pool].withdraw(id, now) {
            return Err(SimError::Inconsistent(format!("{id} missing from {pool} queue")));
        }

        let stage = stage_id(process.stage_index());
        let arrival = process.arrival();
        if let Some(mut process) = self.processes.remove(&id) {
            process.abandon();
        }
        let record = AbandonmentRecord {
            entity: id,
            stage,
            pool,
            arrival,
            enqueued_at,
            abandoned_at: now,
            waited: now.since(enqueued_at),
        };
        debug!(entity = id.0, waited = record.waited, "Abandoned");
        observer.on_abandon(&record);
        self.stats.record_abandonment(record);
        Ok(())
    }
}

/// The builder caps the pipeline at `u16::MAX` stages, so this cannot truncate.
fn stage_id(index: usize) -> StageId {
    StageId(index as u16)
}
