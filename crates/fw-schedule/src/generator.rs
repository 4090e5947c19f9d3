//! Seeded random scenarios for stress runs.
//!
//! The same seed always yields the same scenario.  Arrival times are strictly
//! increasing, so stop-completion order (and therefore fairness priority)
//! matches `car_id` order up to scheduling jitter.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use fw_core::Direction;

use crate::{AgentSpec, ScheduleError, ScheduleResult};

#[derive(Clone, Debug)]
pub struct ScenarioGenerator {
    /// Number of cars to generate.
    pub count: usize,
    pub seed:  u64,
    /// Inclusive lower bound on the gap between consecutive arrivals.
    pub min_gap_secs: f64,
    /// Exclusive upper bound on the gap between consecutive arrivals.
    pub max_gap_secs: f64,
}

impl ScenarioGenerator {
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            min_gap_secs: 0.1,
            max_gap_secs: 1.5,
        }
    }

    pub fn gaps(mut self, min_gap_secs: f64, max_gap_secs: f64) -> Self {
        self.min_gap_secs = min_gap_secs;
        self.max_gap_secs = max_gap_secs;
        self
    }

    /// Cars numbered from 1, first arrival after one gap.
    ///
    /// Fails if `count` does not fit a `u32` car id or either gap bound is
    /// negative or not finite.  A zero or inverted range is widened so every
    /// gap stays positive.
    pub fn generate(&self) -> ScheduleResult<Vec<AgentSpec>> {
        let count = u32::try_from(self.count).map_err(|_| {
            ScheduleError::Generator(format!("{} cars exceed the u32 car id range", self.count))
        })?;
        for (name, value) in [("min_gap_secs", self.min_gap_secs), ("max_gap_secs", self.max_gap_secs)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScheduleError::Generator(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let min_gap = self.min_gap_secs.max(f64::EPSILON);
        let max_gap = self.max_gap_secs.max(min_gap + f64::EPSILON);

        let mut arrival = 0.0;
        Ok((1..=count)
            .map(|car_id| {
                arrival += rng.gen_range(min_gap..max_gap);
                let origin = Direction::ALL[rng.gen_range(0..4)];
                let target = Direction::ALL[rng.gen_range(0..4)];
                AgentSpec::new(car_id, arrival, origin, target)
            })
            .collect())
    }
}
