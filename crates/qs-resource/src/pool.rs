//! `ResourcePool` — one finite-capacity station and its wait queue.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use tracing::debug;

use qs_core::{EntityId, PoolId, QsError, QsResult, SimTime};

// ── Grant ─────────────────────────────────────────────────────────────────────

/// Proof that an entity holds one slot of a pool.
///
/// Deliberately neither `Clone` nor `Copy`: [`ResourcePool::release`] takes
/// it by value, so a slot cannot be returned twice through the same grant.
#[derive(Debug, PartialEq, Eq)]
pub struct Grant {
    pool:       PoolId,
    id:         u64,
    entity:     EntityId,
    granted_at: SimTime,
}

impl Grant {
    pub fn pool(&self) -> PoolId {
        self.pool
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn entity(&self) -> EntityId {
        self.entity
    }

    pub fn granted_at(&self) -> SimTime {
        self.granted_at
    }
}

/// Outcome of [`ResourcePool::request`].
#[derive(Debug, PartialEq, Eq)]
pub enum Request {
    /// A slot was free and nobody was waiting.
    Granted(Grant),
    /// The entity joined the back of the queue behind `ahead` others.
    Queued { ahead: usize },
}

// ── QueueMonitor ──────────────────────────────────────────────────────────────

/// Time-weighted record of a pool's queue length.
#[derive(Clone, Debug, Default)]
pub struct QueueMonitor {
    last_change: SimTime,
    current:     usize,
    area:        f64,
    max_len:     usize,
}

impl QueueMonitor {
    fn update(&mut self, now: SimTime, new_len: usize) {
        self.area += self.current as f64 * now.since(self.last_change);
        self.last_change = now;
        self.current = new_len;
        self.max_len = self.max_len.max(new_len);
    }

    /// Mean queue length over `[0, until]`.  Zero for an empty interval.
    pub fn time_average(&self, until: SimTime) -> f64 {
        let span = until.as_f64();
        if span <= 0.0 {
            return 0.0;
        }
        let tail = self.current as f64 * until.since(self.last_change);
        (self.area + tail) / span
    }

    /// Longest queue observed so far.
    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

// ── ResourcePool ──────────────────────────────────────────────────────────────

/// A capacity-bounded shared station with strict FIFO admission.
///
/// Invariant: `0 <= in_use <= capacity` after every call.  The pool is only
/// mutated by the simulation step that processes a request, release, or
/// withdrawal; outside code sees it through `&ResourcePool`.
#[derive(Debug)]
pub struct ResourcePool {
    id:            PoolId,
    name:          String,
    capacity:      u32,
    in_use:        u32,
    wait_queue:    VecDeque<EntityId>,
    /// Outstanding grants: grant id → holder.
    held:          FxHashMap<u64, EntityId>,
    next_grant:    u64,
    grants_issued: u64,
    monitor:       QueueMonitor,
}

impl ResourcePool {
    /// Fails with [`QsError::InvalidCapacity`] unless `1 <= capacity <= u32::MAX`.
    pub fn new(id: PoolId, name: impl Into<String>, capacity: i64) -> QsResult<Self> {
        let capacity = u32::try_from(capacity)
            .ok()
            .filter(|&c| c > 0)
            .ok_or(QsError::InvalidCapacity(capacity))?;
        Ok(Self {
            id,
            name: name.into(),
            capacity,
            in_use: 0,
            wait_queue: VecDeque::new(),
            held: FxHashMap::default(),
            next_grant: 0,
            grants_issued: 0,
            monitor: QueueMonitor::default(),
        })
    }

    // ── Admission ─────────────────────────────────────────────────────────

    /// Ask for one slot on behalf of `entity` at time `now`.
    ///
    /// Granted immediately only if a slot is free *and* the queue is empty;
    /// otherwise the entity is appended to the queue and will be granted by
    /// a later [`release`][Self::release].
    pub fn request(&mut self, entity: EntityId, now: SimTime) -> Request {
        if self.wait_queue.is_empty() && self.in_use < self.capacity {
            return Request::Granted(self.issue(entity, now));
        }
        let ahead = self.wait_queue.len();
        self.wait_queue.push_back(entity);
        self.monitor.update(now, self.wait_queue.len());
        debug!(pool = %self.name, entity = entity.0, ahead, "Queued");
        Request::Queued { ahead }
    }

    /// Return the slot held by `grant`.
    ///
    /// If entities are waiting, the head of the queue is granted the freed
    /// slot in the same call and its grant is returned; the caller is
    /// responsible for resuming that entity.
    ///
    /// Fails with [`QsError::NotHeld`] if `grant` was issued by another pool
    /// or is not currently outstanding here.
    pub fn release(&mut self, grant: Grant, now: SimTime) -> QsResult<Option<Grant>> {
        if grant.pool != self.id || self.held.remove(&grant.id).is_none() {
            return Err(QsError::NotHeld { pool: self.id, grant: grant.id });
        }
        self.in_use -= 1;

        let Some(head) = self.wait_queue.pop_front() else {
            return Ok(None);
        };
        self.monitor.update(now, self.wait_queue.len());
        Ok(Some(self.issue(head, now)))
    }

    /// Remove a waiting entity from the queue (reneging).  Returns `false`
    /// if the entity was not waiting here.
    pub fn withdraw(&mut self, entity: EntityId, now: SimTime) -> bool {
        let Some(pos) = self.wait_queue.iter().position(|&e| e == entity) else {
            return false;
        };
        self.wait_queue.remove(pos);
        self.monitor.update(now, self.wait_queue.len());
        debug!(pool = %self.name, entity = entity.0, "Withdrawn from queue");
        true
    }

    fn issue(&mut self, entity: EntityId, now: SimTime) -> Grant {
        self.in_use += 1;
        debug_assert!(self.in_use <= self.capacity);
        let id = self.next_grant;
        self.next_grant += 1;
        self.grants_issued += 1;
        self.held.insert(id, entity);
        debug!(pool = %self.name, entity = entity.0, time = now.as_f64(), "Granted");
        Grant { pool: self.id, id, entity, granted_at: now }
    }

    // ── Observation ───────────────────────────────────────────────────────

    pub fn id(&self) -> PoolId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn in_use(&self) -> u32 {
        self.in_use
    }

    /// Free slots right now.
    pub fn available(&self) -> u32 {
        self.capacity - self.in_use
    }

    /// Entities currently waiting (not counting those being served).
    pub fn queue_length(&self) -> usize {
        self.wait_queue.len()
    }

    /// Whether `entity` is waiting in this pool's queue.
    pub fn is_waiting(&self, entity: EntityId) -> bool {
        self.wait_queue.contains(&entity)
    }

    /// Total grants issued since construction.
    pub fn grants_issued(&self) -> u64 {
        self.grants_issued
    }

    pub fn monitor(&self) -> &QueueMonitor {
        &self.monitor
    }
}
