//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;

use fw_core::{AgentId, CrossingConfig};
use fw_schedule::AgentSpec;

use crate::{Agent, Sim, SimError, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - The scenario: one [`AgentSpec`] per car, in the order that becomes
///   `AgentId` order.
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                        |
/// |--------------------|--------------------------------|
/// | `.config(c)`       | `CrossingConfig::default()`    |
/// | `.time_scale(s)`   | `1.0` (real time)              |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(sample_scenario())
///     .time_scale(0.01)
///     .build()?;
/// let report = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder {
    specs:  Vec<AgentSpec>,
    config: CrossingConfig,
}

impl SimBuilder {
    pub fn new(specs: Vec<AgentSpec>) -> Self {
        Self {
            specs,
            config: CrossingConfig::default(),
        }
    }

    /// Replace the whole configuration, including its time scale.
    pub fn config(mut self, config: CrossingConfig) -> Self {
        self.config = config;
        self
    }

    /// Keep the configured durations but play them back at a different speed.
    pub fn time_scale(mut self, time_scale: f64) -> Self {
        self.config.time_scale = time_scale;
        self
    }

    /// Validate the scenario and configuration and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        if self.specs.is_empty() {
            return Err(SimError::EmptyScenario);
        }
        if u32::try_from(self.specs.len()).is_err() {
            return Err(SimError::TooManyAgents(self.specs.len()));
        }

        let mut seen = HashSet::with_capacity(self.specs.len());
        for spec in &self.specs {
            if !seen.insert(spec.car_id) {
                return Err(SimError::DuplicateCar(spec.car_id));
            }
            if !spec.arrival_secs.is_finite() || spec.arrival_secs < 0.0 {
                return Err(SimError::InvalidArrival {
                    car_id:       spec.car_id,
                    arrival_secs: spec.arrival_secs,
                });
            }
        }

        let agents = self
            .specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Agent::new(AgentId(i as u32), spec))
            .collect();

        Ok(Sim {
            config: self.config,
            agents,
        })
    }
}
