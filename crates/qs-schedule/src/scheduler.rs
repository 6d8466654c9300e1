//! The `Scheduler` — sole owner of simulated time.

use qs_core::{Delay, QsResult, SimClock, SimTime};
use tracing::{debug, trace};

use crate::{EventKey, EventQueue};

/// Virtual clock plus pending events.
///
/// `now` only moves when an event is popped (to that event's due time) or
/// when a horizon is reached.  Because every delay is non-negative, nothing
/// can be scheduled in the past and `now` is non-decreasing for the whole
/// run; [`SimClock::advance_to`] enforces it regardless.
#[derive(Debug)]
pub struct Scheduler<E> {
    clock:     SimClock,
    queue:     EventQueue<E>,
    processed: u64,
}

impl<E> Default for Scheduler<E> {
    fn default() -> Self {
        Self {
            clock:     SimClock::new(),
            queue:     EventQueue::new(),
            processed: 0,
        }
    }
}

impl<E> Scheduler<E> {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Schedule `event` at `now + delay`.
    ///
    /// Fails with `QsError::InvalidDelay` if `delay` is negative or not
    /// finite; nothing is inserted in that case.
    pub fn schedule_after(&mut self, delay: f64, event: E) -> QsResult<EventKey> {
        let delay = Delay::new(delay)?;
        Ok(self.schedule_in(delay, event))
    }

    /// Schedule `event` at `now + delay` for an already-validated delay.
    pub fn schedule_in(&mut self, delay: Delay, event: E) -> EventKey {
        self.queue.push(self.clock.now() + delay, event)
    }

    /// Cancel a pending event.  Returns the event if it was still pending.
    pub fn cancel(&mut self, key: EventKey) -> Option<E> {
        self.queue.cancel(key)
    }

    /// Pop the earliest event if it is due at or before `horizon` (or
    /// unconditionally when there is no horizon), advancing `now` to its
    /// due time.
    ///
    /// Returns `Ok(None)` once the event set is empty or the next event lies
    /// beyond the horizon.  Such events stay queued.
    pub fn next_due(&mut self, horizon: Option<SimTime>) -> QsResult<Option<E>> {
        let Some(key) = self.queue.peek_key() else {
            return Ok(None);
        };
        if horizon.is_some_and(|h| key.time > h) {
            debug!(remaining_events = self.queue.len(), "Horizon reached");
            return Ok(None);
        }
        let Some((key, event)) = self.queue.pop_first() else {
            return Ok(None);
        };
        self.clock.advance_to(key.time)?;
        self.processed += 1;
        trace!(time = key.time.as_f64(), sequence = key.sequence, "Processing event");
        Ok(Some(event))
    }

    /// Move `now` forward to `horizon` if it has not got there yet.
    pub fn close_at(&mut self, horizon: SimTime) -> QsResult<()> {
        if self.clock.now() < horizon {
            self.clock.advance_to(horizon)?;
        }
        Ok(())
    }

    /// Pop and hand every due event to `handler` until the event set is
    /// empty or the horizon is reached, then advance `now` to the horizon.
    ///
    /// `handler` receives the scheduler back so it can schedule follow-up
    /// events.  The first handler error stops the run and is returned.
    pub fn run_until<F>(&mut self, horizon: Option<SimTime>, mut handler: F) -> QsResult<u64>
    where
        F: FnMut(&mut Self, E) -> QsResult<()>,
    {
        let start = self.processed;
        while let Some(event) = self.next_due(horizon)? {
            handler(self, event)?;
        }
        if let Some(h) = horizon {
            self.close_at(h)?;
        }
        Ok(self.processed - start)
    }

    /// Events popped so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    /// Events still waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}
