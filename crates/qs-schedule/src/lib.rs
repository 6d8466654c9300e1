//! `qs-schedule` — the virtual clock and the pending-event set.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`event_queue`] | `EventKey` (`time`, `sequence`), `EventQueue<E>`          |
//! | [`scheduler`]   | `Scheduler<E>` — owns the `SimClock`, pops due events     |
//!
//! # Ordering model (summary)
//!
//! ```text
//! key          = (due_time, sequence)
//! sequence     = insertion counter, never reused within a run
//! pop order    = smallest key first
//! ```
//!
//! Two events due at the same instant therefore fire in the order they were
//! scheduled, which is what makes a seeded run reproducible.

pub mod event_queue;
pub mod scheduler;


pub use event_queue::{EventKey, EventQueue};
pub use scheduler::Scheduler;
