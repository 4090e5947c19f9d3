//! The `Sim` struct and its threaded run.

use std::thread;

use crate::{
    Agent, AgentOutcome, AgentTimeline, Intersection, RunReport, SimError, SimObserver, SimResult,
};
use fw_core::CrossingConfig;

/// A fixed set of cars and the configuration they cross under.
///
/// Create via [`SimBuilder`][crate::SimBuilder].  A `Sim` can be run more
/// than once; each run starts from a fresh clock, fresh locks, and fresh
/// status rows.
pub struct Sim {
    pub config: CrossingConfig,
    /// Agent table, indexed by `AgentId`.
    pub agents: Vec<Agent>,
}

impl Sim {
    /// Run every car on its own thread until all have exited.
    ///
    /// Events reach `observer` one at a time from the agent threads.  There
    /// is no timeout: a scenario that cannot make progress blocks forever.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunReport> {
        for agent in &mut self.agents {
            agent.reset();
        }
        observer.on_sim_start(self.agents.len());
        tracing::info!(agents = self.agents.len(), time_scale = self.config.time_scale, "run starting");

        let ctx = Intersection::new(
            self.config.clone(),
            self.agents.iter().map(|a| a.spec.origin),
            &mut *observer,
        );

        let timelines = thread::scope(|scope| -> SimResult<Vec<AgentTimeline>> {
            let mut handles = Vec::with_capacity(self.agents.len());
            for agent in &mut self.agents {
                let car_id = agent.spec.car_id;
                let ctx = &ctx;
                let handle = thread::Builder::new()
                    .name(format!("car-{car_id}"))
                    .spawn_scoped(scope, move || agent.run(ctx))
                    .map_err(|source| SimError::Spawn { car_id, source })?;
                handles.push((car_id, handle));
            }
            handles
                .into_iter()
                .map(|(car_id, handle)| {
                    handle.join().map_err(|_| SimError::AgentPanicked { car_id })
                })
                .collect()
        })?;

        let elapsed_secs = ctx.clock.now();
        let statuses = ctx.tracker.snapshot();
        drop(ctx);
        observer.on_sim_end(elapsed_secs);

        let outcomes = self
            .agents
            .iter()
            .zip(timelines)
            .zip(statuses)
            .map(|((agent, timeline), status)| AgentOutcome {
                id: agent.id,
                spec: agent.spec,
                turn: agent.turn,
                regions: agent.regions,
                timeline,
                status,
            })
            .collect();

        tracing::info!(elapsed_secs, "run complete");
        Ok(RunReport { elapsed_secs, outcomes })
    }
}
