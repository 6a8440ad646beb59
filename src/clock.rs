//! Sources of simulation time.
//!
//! Everything in a frame is evaluated against a single scalar time, in
//! seconds. The default source is the wall clock, optionally sped up so
//! long orbital periods become visible motion.

use std::cell::Cell;

use chrono::Utc;

use crate::error::{Error, Result};

pub trait TimeSource {
    /// Current simulation time, in seconds
    fn now(&self) -> f64;
}

/// Wall-clock seconds since the Unix epoch, scaled by a fixed multiplier.
#[derive(Debug)]
pub struct SystemClock {
    multiplier: f64,
    // Largest value handed out so far; the system clock may step backwards
    last: Cell<f64>,
}

impl SystemClock {
    pub fn new(multiplier: f64) -> Result<Self> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(Error::InvalidSpeedMultiplier(multiplier));
        }
        Ok(Self {
            multiplier,
            last: Cell::new(f64::NEG_INFINITY),
        })
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Unscaled wall-clock time, in seconds
    pub fn wall_seconds() -> f64 {
        let now = Utc::now();
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) * 1e-9
    }

    // Never hands out a time earlier than one already returned
    fn clamp_forward(&self, time: f64) -> f64 {
        let time = f64::max(time, self.last.get());
        self.last.set(time);
        time
    }
}

impl TimeSource for SystemClock {
    fn now(&self) -> f64 {
        self.clamp_forward(Self::wall_seconds() * self.multiplier)
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    time: Cell<f64>,
}

impl ManualClock {
    pub fn new(time: f64) -> Self {
        Self {
            time: Cell::new(time),
        }
    }

    pub fn set(&self, time: f64) {
        self.time.set(time);
    }

    pub fn advance(&self, dt: f64) {
        self.time.set(self.time.get() + dt);
    }
}

impl TimeSource for ManualClock {
    fn now(&self) -> f64 {
        self.time.get()
    }
}
