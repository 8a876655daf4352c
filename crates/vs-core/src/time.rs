//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter where one tick is one
//! simulated second since the polls open.  Integer ticks keep all arrival and
//! completion arithmetic exact, and comparisons are O(1).

use std::fmt;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 3_600;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Seconds since the polls opened.
///
/// Stored as `u64`: cumulative exponential arrivals may drift past the end of
/// the election day, and completion times add service durations on top.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The first second of election-day hour `hour` (0-based).
    #[inline]
    pub fn hour_start(hour: u32) -> Tick {
        Tick(hour as u64 * SECS_PER_HOUR)
    }

    /// Return the tick `n` seconds after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Seconds elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }

    /// Advance by one second.
    #[inline]
    pub fn advance(&mut self) {
        self.0 += 1;
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.0 / SECS_PER_HOUR;
        let m = (self.0 % SECS_PER_HOUR) / SECS_PER_MINUTE;
        let s = self.0 % SECS_PER_MINUTE;
        write!(f, "T{} ({h}:{m:02}:{s:02})", self.0)
    }
}

/// Whole minutes in `secs`, rounded down.  Wait times are bucketed and
/// compared against thresholds at this resolution.
#[inline]
pub fn whole_minutes(secs: u64) -> u64 {
    secs / SECS_PER_MINUTE
}
