//! `Process` — one entity's journey as an explicit state machine.
//!
//! A process is not a coroutine.  It is a small record (`stage_index`,
//! `phase`, `awaiting`) that the run loop advances each time the scheduler
//! resumes it, until the next suspension point.

use qs_core::{EntityId, PoolId, SimTime};
use qs_resource::Grant;
use qs_schedule::EventKey;
use qs_stats::{MeasurementRecord, OpenHold, StageRecord};

/// Coarse lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// Will make progress the next time it is stepped.
    Runnable,
    /// Suspended on a timeout or in a pool's queue.
    Waiting,
    /// Finished (served or abandoned).  Irreversible.
    Done,
}

/// Position inside the current stage.
#[derive(Debug)]
pub(crate) enum Phase {
    /// About to start `stage_index`.
    Ready,
    /// In `pool`'s wait queue.  `renege` is the armed patience timer.
    Queued {
        pool:        PoolId,
        enqueued_at: SimTime,
        queue_len:   usize,
        renege:      Option<EventKey>,
    },
    /// Holds a slot but has not started its hold timer yet.
    Granted {
        grant:       Grant,
        enqueued_at: SimTime,
        queue_len:   usize,
    },
    /// Holding a slot until the hold timer fires.
    Holding {
        grant:       Grant,
        enqueued_at: SimTime,
        queue_len:   usize,
    },
    /// Serving a transition delay.
    Delaying { started_at: SimTime },
}

/// One entity traversal.  Created on arrival, discarded when done.
#[derive(Debug)]
pub struct Process {
    id:                 EntityId,
    arrival:            SimTime,
    state:              ProcessState,
    stage_index:        usize,
    pub(crate) phase:   Phase,
    /// Resume event the process is suspended on, if any.
    awaiting:           Option<EventKey>,
    /// Completed stage passes, in order.
    stages:             Vec<StageRecord>,
}

impl Process {
    pub(crate) fn new(id: EntityId, arrival: SimTime) -> Self {
        Self {
            id,
            arrival,
            state: ProcessState::Runnable,
            stage_index: 0,
            phase: Phase::Ready,
            awaiting: None,
            stages: Vec::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn arrival(&self) -> SimTime {
        self.arrival
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn awaiting(&self) -> Option<EventKey> {
        self.awaiting
    }

    pub fn is_done(&self) -> bool {
        self.state == ProcessState::Done
    }

    /// The slot this process holds, if any, as seen by utilization.
    pub(crate) fn open_hold(&self) -> Option<OpenHold> {
        match &self.phase {
            Phase::Granted { grant, .. } | Phase::Holding { grant, .. } => Some(OpenHold {
                pool:       grant.pool(),
                granted_at: grant.granted_at(),
            }),
            _ => None,
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    pub(crate) fn suspend(&mut self, phase: Phase, awaiting: Option<EventKey>) {
        self.phase = phase;
        self.awaiting = awaiting;
        self.state = ProcessState::Waiting;
    }

    /// Mark runnable in `phase`; `awaiting` is the zero-delay resume event.
    pub(crate) fn wake(&mut self, phase: Phase, awaiting: EventKey) {
        self.phase = phase;
        self.awaiting = Some(awaiting);
        self.state = ProcessState::Runnable;
    }

    /// Take the phase out for inspection, leaving `Ready` behind.
    pub(crate) fn take_phase(&mut self) -> Phase {
        self.awaiting = None;
        self.state = ProcessState::Runnable;
        std::mem::replace(&mut self.phase, Phase::Ready)
    }

    /// Close the current stage and move to the next one.
    pub(crate) fn complete_stage(&mut self, record: StageRecord) {
        self.stages.push(record);
        self.stage_index += 1;
        self.phase = Phase::Ready;
    }

    /// Close the journey and hand back its measurement record.
    pub(crate) fn finish(&mut self, now: SimTime) -> MeasurementRecord {
        self.state = ProcessState::Done;
        MeasurementRecord {
            entity:     self.id,
            arrival:    self.arrival,
            completion: now,
            total_time: now.since(self.arrival),
            stages:     std::mem::take(&mut self.stages),
        }
    }

    pub(crate) fn abandon(&mut self) {
        self.state = ProcessState::Done;
        self.awaiting = None;
    }
}
