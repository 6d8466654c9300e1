//! `qsim` run loop — entities, stages, arrivals, and the driver that ties
//! them to the scheduler.
//!
//! # Event loop
//!
//! ```text
//! start:     schedule Arrival after the first interarrival gap
//! loop:      pop the earliest event due at or before the horizon
//!   Arrival    → spawn a Process, schedule the next Arrival, Resume(new)
//!   Resume(e)  → run e's state machine to its next suspension point
//!   Renege(e)  → if e is still queued, withdraw it and end it abandoned
//! stop:      event set empty, or next event beyond the horizon
//!            (clock then moves to the horizon)
//! ```
//!
//! A process suspends only on `Timeout` (hold timers, transition delays,
//! patience timers) and on `Acquire` when the pool is busy.  Everything else
//! (requesting a free slot, releasing, recording a stage) happens inside the
//! step that reached it.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | [`run_scenarios`] runs scenarios on Rayon's pool.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use qs_sample::{Exponential, Uniform};
//! use qs_sim::{ArrivalLimit, NoopObserver, SimBuilder, StageSpec};
//!
//! let mut sim = SimBuilder::new(42, Exponential::with_mean(1.8)?, ArrivalLimit::Count(400))
//!     .horizon(900.0)
//!     .pool("registration", 2)
//!     .stage(StageSpec::service("register", "registration", Uniform::new(4.0, 6.0)?))
//!     .build()?;
//! let summary = sim.run(&mut NoopObserver)?;
//! ```

pub mod arrivals;
pub mod batch;
pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod process;
pub mod sim;
pub mod stage;


pub use arrivals::{ArrivalGenerator, ArrivalLimit};
pub use batch::run_scenarios;
pub use builder::SimBuilder;
pub use config::{ArrivalConfig, PoolConfig, ScenarioConfig, ScenarioSet, StageConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use process::{Process, ProcessState};
pub use sim::{Sim, SimEvent};
pub use stage::{Pipeline, Stage, StageSpec};
