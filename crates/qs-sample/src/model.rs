//! The `Sampler` trait — the seam where distributions plug into the engine.

use qs_core::{Delay, QsResult, StreamRng};

/// A source of durations (interarrival gaps, service times, patience).
///
/// Each sampler draws from the [`StreamRng`] it is handed, so the same
/// sampler fed the same stream always reproduces the same sequence.
///
/// Closures become samplers through [`from_fn`], which keeps tests and
/// one-off scenarios short:
///
/// ```rust,ignore
/// let mut steps = [1.0, 2.0, 3.0].into_iter().cycle();
/// let sampler = from_fn(move |_| steps.next().unwrap_or(0.0));
/// ```
pub trait Sampler: Send {
    /// Draw one raw value.  May be negative if the distribution is
    /// misconfigured; callers validate through [`sample_delay`][Self::sample_delay].
    fn sample(&mut self, rng: &mut StreamRng) -> f64;

    /// Draw one value and validate it as a [`Delay`].
    ///
    /// Negative or non-finite draws surface as `QsError::InvalidDelay`
    /// instead of being clamped.  Wrap the sampler in
    /// [`Clamped`][crate::Clamped] to opt into clamping.
    fn sample_delay(&mut self, rng: &mut StreamRng) -> QsResult<Delay> {
        Delay::new(self.sample(rng))
    }
}

impl<S: Sampler + ?Sized> Sampler for Box<S> {
    #[inline]
    fn sample(&mut self, rng: &mut StreamRng) -> f64 {
        (**self).sample(rng)
    }
}

/// Type-erased sampler as stored by stages and the arrival generator.
pub type BoxedSampler = Box<dyn Sampler>;

// ── Closure adapter ───────────────────────────────────────────────────────────

/// A sampler backed by a closure.  Built with [`from_fn`].
pub struct FromFn<F>(F);

/// Wrap `f` as a [`Sampler`].
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&mut StreamRng) -> f64 + Send,
{
    FromFn(f)
}

impl<F> Sampler for FromFn<F>
where
    F: FnMut(&mut StreamRng) -> f64 + Send,
{
    #[inline]
    fn sample(&mut self, rng: &mut StreamRng) -> f64 {
        (self.0)(rng)
    }
}
