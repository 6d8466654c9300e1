//! `qs-sample` — the sampling capability injected into the engine.
//!
//! The engine never knows which distribution it is drawing from; it only
//! calls [`Sampler::sample`] and validates the result as a [`Delay`].
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`model`]   | `Sampler` trait, `from_fn` closure adapter                      |
//! | [`dist`]    | `Fixed`, `Uniform`, `Exponential`, `Normal`                     |
//! | [`policy`]  | `NegativeSamples` policy and the `Clamped<S>` wrapper           |
//! | [`spec`]    | `DistributionSpec` — serde description → boxed sampler          |
//! | [`error`]   | `SampleError`, `SampleResult<T>`                                |
//!
//! [`Delay`]: qs_core::Delay

pub mod dist;
pub mod error;
pub mod model;
pub mod policy;
pub mod spec;

#[cfg(test)]
mod tests;

pub use dist::{Exponential, Fixed, Normal, Uniform};
pub use error::{SampleError, SampleResult};
pub use model::{BoxedSampler, FromFn, Sampler, from_fn};
pub use policy::{Clamped, NegativeSamples};
pub use spec::DistributionSpec;
