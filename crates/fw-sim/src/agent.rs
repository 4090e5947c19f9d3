//! The per-car state machine.

use fw_core::{AgentId, RegionSet, TurnKind};
use fw_schedule::AgentSpec;
use fw_sync::GateGuard;

use crate::{AgentTimeline, EventKind, Intersection, SimObserver};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AgentPhase {
    Scheduled,
    Approaching,
    WaitingAtFront,
    Crossing,
    Exited,
}

/// One car.  `turn` and `regions` are fixed at construction from the spec.
#[derive(Clone, Debug)]
pub struct Agent {
    pub id:      AgentId,
    pub spec:    AgentSpec,
    pub turn:    TurnKind,
    pub regions: RegionSet,
    phase:       AgentPhase,
}

impl Agent {
    pub fn new(id: AgentId, spec: AgentSpec) -> Self {
        Self {
            id,
            turn: spec.turn(),
            regions: spec.regions(),
            spec,
            phase: AgentPhase::Scheduled,
        }
    }

    pub fn phase(&self) -> AgentPhase {
        self.phase
    }

    /// Put the agent back in `Scheduled` for another run.
    pub fn reset(&mut self) {
        self.phase = AgentPhase::Scheduled;
    }

    /// Drive the car from its scheduled arrival until it has exited.
    ///
    /// Blocks the calling thread for the whole trip.
    pub fn run<S: SimObserver>(&mut self, ctx: &Intersection<S>) -> AgentTimeline {
        let _span = tracing::debug_span!(
            "car",
            id = self.spec.car_id,
            origin = %self.spec.origin,
            target = %self.spec.target,
        )
        .entered();

        let mut timeline = AgentTimeline::default();
        self.approach(ctx, &mut timeline);
        let gate = self.wait_at_front(ctx, &mut timeline);
        self.cross(ctx, gate, &mut timeline);
        self.exit(ctx, &mut timeline);
        timeline
    }

    fn approach<S: SimObserver>(&mut self, ctx: &Intersection<S>, timeline: &mut AgentTimeline) {
        ctx.clock.sleep_until(self.spec.arrival_secs);
        self.phase = AgentPhase::Approaching;
        timeline.arrived = ctx.emit(self.id, &self.spec, EventKind::Arriving);

        ctx.clock.sleep_for(ctx.config.stop_secs);
        timeline.stop_complete = ctx.tracker.record_stop_complete(self.id, &ctx.clock);
    }

    fn wait_at_front<'c, S: SimObserver>(
        &mut self,
        ctx:      &'c Intersection<S>,
        timeline: &mut AgentTimeline,
    ) -> GateGuard<'c> {
        let gate = ctx.gates.enter(self.spec.origin, self.id);
        self.phase = AgentPhase::WaitingAtFront;
        timeline.front_of_line = ctx.tracker.mark_front_and_waiting(self.id, &ctx.clock);
        timeline.fairness_waits += ctx.tracker.wait_for_turn(self.id);
        gate
    }

    /// Take the quadrants, commit, open the approach gate, hold for the
    /// crossing time, then give the quadrants back.
    fn cross<'c, S: SimObserver>(
        &mut self,
        ctx:      &'c Intersection<S>,
        gate:     GateGuard<'c>,
        timeline: &mut AgentTimeline,
    ) {
        let claim = loop {
            let claim = ctx.regions.acquire_set(self.regions, self.spec.origin);
            if let Some(t) = ctx.tracker.try_begin_crossing(self.id, &ctx.clock) {
                timeline.cross_start = t;
                break claim;
            }
            // An older car on another approach started waiting while we were
            // collecting quadrants: give them back and wait our turn again.
            drop(claim);
            timeline.yields += 1;
            tracing::debug!(regions = %self.regions, "yielded quadrants to earlier waiter");
            timeline.fairness_waits += ctx.tracker.wait_for_turn(self.id);
        };
        self.phase = AgentPhase::Crossing;

        timeline.gate_released = ctx.clock.now();
        drop(gate);

        ctx.emit(self.id, &self.spec, EventKind::Crossing);
        ctx.clock.sleep_for(ctx.config.crossing_secs(self.turn));
        timeline.cross_end = ctx.tracker.finish_crossing(self.id, &ctx.clock);
        claim.release();
    }

    fn exit<S: SimObserver>(&mut self, ctx: &Intersection<S>, timeline: &mut AgentTimeline) {
        self.phase = AgentPhase::Exited;
        timeline.exited = ctx.emit(self.id, &self.spec, EventKind::Exiting);
        ctx.tracker.mark_done(self.id);
    }
}
