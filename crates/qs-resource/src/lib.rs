//! `qs-resource` — finite-capacity stations with FIFO wait queues.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                      |
//! |--------------|---------------------------------------------------------------|
//! | [`pool`]     | `ResourcePool`, `Grant`, `Request`, `QueueMonitor`            |
//! | [`registry`] | `PoolRegistry` — declared pools, name → `PoolId` resolution   |
//! | [`error`]    | `RegistryError`, `RegistryResult<T>`                          |
//!
//! # Admission model (summary)
//!
//! ```text
//! request(e):  queue empty && in_use < capacity → in_use += 1, Granted
//!              otherwise                        → push_back(e), Queued
//! release(g):  in_use -= 1
//!              queue non-empty                  → pop_front → in_use += 1,
//!                                                 grant handed to the head
//! ```
//!
//! A release with waiters hands its slot straight to the head of the queue
//! in the same call, so a slot is never idle while demand exists and no
//! later arrival can overtake an earlier one.

pub mod error;
pub mod pool;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{RegistryError, RegistryResult};
pub use pool::{Grant, QueueMonitor, Request, ResourcePool};
pub use registry::PoolRegistry;
