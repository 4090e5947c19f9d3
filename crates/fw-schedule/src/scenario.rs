//! Per-car scenario entries.

use fw_core::{Direction, RegionSet, TurnKind};

use crate::{ScheduleError, ScheduleResult};

/// Static description of one car: when it shows up and which way it goes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentSpec {
    /// Label printed in the event log.  Not required to be dense.
    pub car_id:       u32,
    /// Simulated time at which the car reaches the stop line.
    pub arrival_secs: f64,
    pub origin:       Direction,
    pub target:       Direction,
}

impl AgentSpec {
    pub fn new(car_id: u32, arrival_secs: f64, origin: Direction, target: Direction) -> Self {
        Self { car_id, arrival_secs, origin, target }
    }

    /// Build a spec from raw scenario fields, rejecting unknown direction
    /// symbols and unusable arrival times.
    pub fn parse(car_id: u32, arrival_secs: f64, origin: &str, target: &str) -> ScheduleResult<Self> {
        let direction = |s: &str| {
            s.parse::<Direction>()
                .map_err(|source| ScheduleError::Direction { car_id, source })
        };
        let spec = Self::new(car_id, arrival_secs, direction(origin)?, direction(target)?);
        spec.check_arrival()?;
        Ok(spec)
    }

    fn check_arrival(&self) -> ScheduleResult<()> {
        if !self.arrival_secs.is_finite() || self.arrival_secs < 0.0 {
            return Err(ScheduleError::Arrival {
                car_id:       self.car_id,
                arrival_secs: self.arrival_secs,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn turn(&self) -> TurnKind {
        TurnKind::between(self.origin, self.target)
    }

    #[inline]
    pub fn regions(&self) -> RegionSet {
        RegionSet::for_path(self.origin, self.turn())
    }
}

/// The eight-car reference scenario.
///
/// Three northbound cars going straight, a northbound left, a southbound
/// straight and left, an eastbound left, and a westbound car turning right
/// onto the northbound road.
pub fn sample_scenario() -> Vec<AgentSpec> {
    use Direction::*;
    vec![
        AgentSpec::new(1, 1.1, North, North),
        AgentSpec::new(2, 2.2, North, North),
        AgentSpec::new(3, 3.3, North, West),
        AgentSpec::new(4, 4.4, South, South),
        AgentSpec::new(5, 5.5, South, East),
        AgentSpec::new(6, 6.6, North, North),
        AgentSpec::new(7, 7.7, East, North),
        AgentSpec::new(8, 8.8, West, North),
    ]
}
