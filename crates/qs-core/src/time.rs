//! Simulated time model.
//!
//! # Design
//!
//! Time is a real-valued, monotonically non-decreasing `SimTime`.  The unit is
//! whatever the scenario says it is (the clinic demo uses minutes); the
//! engine never converts to wall-clock time.
//!
//! `SimTime` and `Delay` are thin `f64` wrappers whose constructors reject
//! negative and non-finite values, so once a value exists it is safe to order
//! with `Ord` (via `f64::total_cmp`) and to add without further checks.

use std::cmp::Ordering;
use std::fmt;

use crate::{QsError, QsResult};

// ── SimTime ──────────────────────────────────────────────────────────────────

/// An absolute point on the simulated timeline.
///
/// Deserializing goes through [`SimTime::new`], so a scenario or saved
/// summary can never carry a negative or non-finite time.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Validate `t` as a point in simulated time.
    pub fn new(t: f64) -> QsResult<SimTime> {
        if t.is_finite() && t >= 0.0 {
            // `+ 0.0` folds -0.0 into 0.0 so `total_cmp` agrees with `==`.
            Ok(SimTime(t + 0.0))
        } else {
            Err(QsError::InvalidTime(t))
        }
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// Time elapsed from `earlier` to `self`.  Zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    #[inline]
    pub fn min(self, other: SimTime) -> SimTime {
        if other < self { other } else { self }
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::ops::Add<Delay> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: Delay) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl TryFrom<f64> for SimTime {
    type Error = QsError;

    fn try_from(t: f64) -> QsResult<SimTime> {
        SimTime::new(t)
    }
}

impl From<SimTime> for f64 {
    fn from(t: SimTime) -> f64 {
        t.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}", self.0)
    }
}

// ── Delay ─────────────────────────────────────────────────────────────────────

/// A non-negative, finite span of simulated time.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct Delay(f64);

impl Delay {
    pub const ZERO: Delay = Delay(0.0);

    /// Fails with [`QsError::InvalidDelay`] if `d` is negative, NaN, or infinite.
    pub fn new(d: f64) -> QsResult<Delay> {
        if d.is_finite() && d >= 0.0 {
            Ok(Delay(d + 0.0))
        } else {
            Err(QsError::InvalidDelay(d))
        }
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Delay {
    type Error = QsError;

    fn try_from(d: f64) -> QsResult<Delay> {
        Delay::new(d)
    }
}

impl From<Delay> for f64 {
    fn from(d: Delay) -> f64 {
        d.0
    }
}

impl fmt::Display for Delay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The single simulated clock of a run.  Owned by the scheduler.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now: SimTime,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock to `t`.  Moving to the current time is a no-op; moving
    /// backwards is a [`QsError::ClockRegression`].
    pub fn advance_to(&mut self, t: SimTime) -> QsResult<()> {
        if t < self.now {
            return Err(QsError::ClockRegression { from: self.now, to: t });
        }
        self.now = t;
        Ok(())
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.now)
    }
}
