//! `EventQueue` — the ordered set of pending events.
//!
//! `BTreeMap` gives O(log n) insert, pop-first, and removal by key.  Removal
//! by key matters: a renege timer that loses its race against a grant is
//! cancelled in place rather than left to fire and be ignored.

use std::collections::BTreeMap;

use qs_core::SimTime;

/// Key for ordering events in the queue.
///
/// Events are ordered by:
/// 1. Time (earlier first)
/// 2. Sequence number (FIFO for events due at the same time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EventKey {
    /// When this event should be processed.
    pub time: SimTime,
    /// Insertion order; breaks ties between equal `time`s.
    pub sequence: u64,
}

/// Pending events keyed by [`EventKey`].
#[derive(Debug)]
pub struct EventQueue<E> {
    inner:         BTreeMap<EventKey, E>,
    next_sequence: u64,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self {
            inner:         BTreeMap::new(),
            next_sequence: 0,
        }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `event` due at `time` and return its key.
    pub fn push(&mut self, time: SimTime, event: E) -> EventKey {
        let key = EventKey { time, sequence: self.next_sequence };
        self.next_sequence += 1;
        self.inner.insert(key, event);
        key
    }

    /// Remove and return the earliest event.
    pub fn pop_first(&mut self) -> Option<(EventKey, E)> {
        self.inner.pop_first()
    }

    /// Key of the earliest event, without removing it.
    pub fn peek_key(&self) -> Option<EventKey> {
        self.inner.first_key_value().map(|(k, _)| *k)
    }

    /// Remove the event with `key`.  Returns `None` if it already fired or
    /// was never scheduled.
    pub fn cancel(&mut self, key: EventKey) -> Option<E> {
        self.inner.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
