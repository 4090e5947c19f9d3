//! Simulation time model.
//!
//! # Design
//!
//! Simulated time is elapsed wall time since the run started, divided by a
//! scale factor:
//!
//!   sim_secs = (now - start) / time_scale
//!
//! With `time_scale = 1.0` the run plays out in real time.  Tests use a small
//! scale (e.g. `0.005`) so that a scenario measured in seconds finishes in a
//! few tens of milliseconds while keeping every ordering relationship intact.
//!
//! All timestamps are `f64` simulated seconds.

use std::thread;
use std::time::{Duration, Instant};

use crate::{CoreError, CoreResult, TurnKind};

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Monotonic simulated-seconds source shared by every agent of a run.
///
/// `SimClock` is `Copy` and holds no heap data; each agent thread keeps its
/// own copy.
#[derive(Copy, Clone, Debug)]
pub struct SimClock {
    start:      Instant,
    time_scale: f64,
}

impl SimClock {
    /// Start a clock now.  `time_scale` is wall seconds per simulated second.
    pub fn start(time_scale: f64) -> Self {
        Self {
            start: Instant::now(),
            time_scale,
        }
    }

    /// Simulated seconds elapsed since [`start`][Self::start].
    #[inline]
    pub fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64() / self.time_scale
    }

    /// Wall-clock duration of `secs` simulated seconds.
    #[inline]
    pub fn wall_duration(&self, secs: f64) -> Duration {
        Duration::from_secs_f64((secs * self.time_scale).max(0.0))
    }

    /// Block the calling thread for `secs` simulated seconds.
    pub fn sleep_for(&self, secs: f64) {
        if secs > 0.0 {
            thread::sleep(self.wall_duration(secs));
        }
    }

    /// Block the calling thread until simulated time reaches `t`.
    ///
    /// Returns immediately if `t` is already in the past.
    pub fn sleep_until(&self, t: f64) {
        loop {
            let remaining = t - self.now();
            if remaining <= 0.0 {
                return;
            }
            thread::sleep(self.wall_duration(remaining));
        }
    }
}

// ── CrossingConfig ────────────────────────────────────────────────────────────

/// Durations of the fixed protocol phases, in simulated seconds.
///
/// Typically left at the defaults or loaded from a JSON file by the
/// application crate and handed to `fw_sim::SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CrossingConfig {
    /// Mandatory pause at the stop line before contending for entry.
    pub stop_secs: f64,

    /// Time a left-turning car occupies its quadrants.
    pub left_secs: f64,

    /// Time a straight-through car occupies its quadrants.
    pub straight_secs: f64,

    /// Time a right-turning car occupies its quadrant.
    pub right_secs: f64,

    /// Wall seconds per simulated second.  `1.0` runs in real time.
    pub time_scale: f64,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            stop_secs:     2.0,
            left_secs:     5.0,
            straight_secs: 4.0,
            right_secs:    3.0,
            time_scale:    1.0,
        }
    }
}

impl CrossingConfig {
    /// Same durations, played back `time_scale` times real speed.
    pub fn with_time_scale(mut self, time_scale: f64) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// How long a car making `turn` holds its quadrants.
    #[inline]
    pub fn crossing_secs(&self, turn: TurnKind) -> f64 {
        match turn {
            TurnKind::Left     => self.left_secs,
            TurnKind::Straight => self.straight_secs,
            TurnKind::Right    => self.right_secs,
        }
    }

    /// Reject non-finite or non-positive values and any durations that are
    /// not ordered left > straight > right.
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("stop_secs",     self.stop_secs),
            ("left_secs",     self.left_secs),
            ("straight_secs", self.straight_secs),
            ("right_secs",    self.right_secs),
            ("time_scale",    self.time_scale),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(CoreError::Config(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        if !(self.left_secs > self.straight_secs && self.straight_secs > self.right_secs) {
            return Err(CoreError::Config(format!(
                "crossing durations must satisfy left > straight > right, got {} / {} / {}",
                self.left_secs, self.straight_secs, self.right_secs
            )));
        }
        Ok(())
    }

    /// A clock for a run under this configuration, started now.
    pub fn start_clock(&self) -> SimClock {
        SimClock::start(self.time_scale)
    }
}
