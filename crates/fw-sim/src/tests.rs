//! Integration tests for fw-sim.
//!
//! Runs use a small time scale so a scenario measured in simulated seconds
//! finishes in milliseconds of wall time.

use std::thread;
use std::time::Duration;

use fw_core::{AgentId, CrossingConfig, Direction, Direction::*};
use fw_schedule::{sample_scenario, AgentSpec, ScenarioGenerator};

use crate::{
    AgentPhase, EventKind, EventLog, NoopObserver, RunReport, SimBuilder, SimError, Violation,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 1 simulated second = 10 ms of wall time.
const SCALE: f64 = 0.01;

fn test_config() -> CrossingConfig {
    CrossingConfig::default().with_time_scale(SCALE)
}

fn car(car_id: u32, arrival_secs: f64, origin: Direction, target: Direction) -> AgentSpec {
    AgentSpec::new(car_id, arrival_secs, origin, target)
}

/// Poll `cond` for up to a second of wall time.
fn eventually(cond: impl Fn() -> bool) -> bool {
    for _ in 0..200 {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    false
}

fn run(specs: Vec<AgentSpec>) -> (RunReport, EventLog) {
    let mut sim = SimBuilder::new(specs).config(test_config()).build().unwrap();
    let mut log = EventLog::default();
    let report = sim.run(&mut log).unwrap();
    (report, log)
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_dense_agent_table() {
        let sim = SimBuilder::new(sample_scenario()).build().unwrap();
        assert_eq!(sim.agents.len(), 8);
        for (i, agent) in sim.agents.iter().enumerate() {
            assert_eq!(agent.id, AgentId(i as u32));
            assert_eq!(agent.phase(), AgentPhase::Scheduled);
            assert_eq!(agent.regions, agent.spec.regions());
        }
    }

    #[test]
    fn empty_scenario_rejected() {
        assert!(matches!(
            SimBuilder::new(vec![]).build(),
            Err(SimError::EmptyScenario)
        ));
    }

    #[test]
    fn duplicate_car_rejected() {
        let specs = vec![car(1, 0.0, North, North), car(1, 1.0, South, South)];
        assert!(matches!(
            SimBuilder::new(specs).build(),
            Err(SimError::DuplicateCar(1))
        ));
    }

    #[test]
    fn negative_arrival_rejected() {
        let specs = vec![car(5, -0.5, North, North)];
        assert!(matches!(
            SimBuilder::new(specs).build(),
            Err(SimError::InvalidArrival { car_id: 5, .. })
        ));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = CrossingConfig { left_secs: 1.0, ..CrossingConfig::default() };
        assert!(matches!(
            SimBuilder::new(sample_scenario()).config(config).build(),
            Err(SimError::Config(_))
        ));
    }

    #[test]
    fn time_scale_override() {
        let sim = SimBuilder::new(sample_scenario()).time_scale(0.5).build().unwrap();
        assert_eq!(sim.config.time_scale, 0.5);
        assert_eq!(sim.config.stop_secs, 2.0);
    }
}

// ── Reference scenario ────────────────────────────────────────────────────────

#[cfg(test)]
mod sample_run_tests {
    use super::*;

    #[test]
    fn sample_scenario_runs_clean() {
        let (report, _log) = run(sample_scenario());
        assert!(report.all_done());
        assert_eq!(report.violations(), vec![]);
    }

    #[test]
    fn each_car_logs_three_events_in_order() {
        let (_report, log) = run(sample_scenario());
        assert_eq!(log.len(), 24);
        for spec in sample_scenario() {
            let events = log.for_car(spec.car_id);
            let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
            assert_eq!(
                kinds,
                vec![EventKind::Arriving, EventKind::Crossing, EventKind::Exiting],
                "car {}",
                spec.car_id
            );
            assert!(events.windows(2).all(|w| w[0].time_secs <= w[1].time_secs));
            assert!(events[0].time_secs >= spec.arrival_secs);
            assert_eq!(events[0].origin, spec.origin);
            assert_eq!(events[0].target, spec.target);
        }
    }

    #[test]
    fn log_timestamps_never_decrease() {
        let (_report, log) = run(sample_scenario());
        assert!(log.events.windows(2).all(|w| w[0].time_secs <= w[1].time_secs));
    }

    #[test]
    fn northbound_cars_take_the_gate_in_arrival_order() {
        let (report, _log) = run(sample_scenario());
        let front = |id| report.outcome(id).unwrap().timeline.front_of_line;
        assert!(front(1) < front(2));
        assert!(front(2) < front(3));
        assert!(front(3) < front(6));
    }

    #[test]
    fn conflicting_lefts_do_not_cross_together() {
        let (report, _log) = run(sample_scenario());
        let south_left = report.outcome(5).unwrap().timeline;
        let east_left = report.outcome(7).unwrap().timeline;
        assert!(
            east_left.cross_start >= south_left.cross_end
                || south_left.cross_start >= east_left.cross_end
        );
    }

    #[test]
    fn agents_end_exited_and_can_run_again() {
        let mut sim = SimBuilder::new(sample_scenario()).config(test_config()).build().unwrap();
        let first = sim.run(&mut NoopObserver).unwrap();
        assert!(sim.agents.iter().all(|a| a.phase() == AgentPhase::Exited));
        let second = sim.run(&mut NoopObserver).unwrap();
        assert!(first.all_done() && second.all_done());
        assert_eq!(second.violations(), vec![]);
    }
}

// ── Protocol properties ───────────────────────────────────────────────────────

#[cfg(test)]
mod protocol_tests {
    use super::*;

    #[test]
    fn same_direction_cars_share_quadrants() {
        // Both need SW+NW; the second gets the gate as soon as the first commits.
        let (report, _log) = run(vec![car(1, 0.0, North, North), car(2, 0.1, North, North)]);
        let a = report.outcome(1).unwrap().timeline;
        let b = report.outcome(2).unwrap().timeline;
        assert!(b.cross_start < a.cross_end, "second car should cross alongside the first");
        assert!(a.gate_released <= b.front_of_line);
        assert_eq!(report.violations(), vec![]);
    }

    #[test]
    fn cross_direction_conflict_is_serialized() {
        // North straight takes SW+NW; East straight needs NW+NE.
        let (report, _log) = run(vec![car(1, 0.0, North, North), car(2, 0.1, East, East)]);
        let north = report.outcome(1).unwrap().timeline;
        let east = report.outcome(2).unwrap().timeline;
        assert!(east.cross_start >= north.cross_end);
    }

    #[test]
    fn disjoint_paths_cross_together() {
        // Opposing right turns use SW and NE only.
        let (report, _log) = run(vec![car(1, 0.0, North, East), car(2, 0.1, South, West)]);
        let a = report.outcome(1).unwrap().timeline;
        let b = report.outcome(2).unwrap().timeline;
        assert!(b.cross_start < a.cross_end);
    }

    #[test]
    fn younger_car_defers_to_blocked_older_car() {
        // Car 1 (north left) holds SW+NW+NE from t≈2 to t≈7.
        // Car 2 (south straight) stops at t≈2.5 and blocks on NE.
        // Car 3 (west right) only needs SE, which is free, but car 2 is older
        // and stuck, so car 3 must not commit before car 2 does.
        let (report, _log) = run(vec![
            car(1, 0.0, North, West),
            car(2, 0.5, South, South),
            car(3, 1.0, West, North),
        ]);
        let blocked = report.outcome(2).unwrap().timeline;
        let younger = report.outcome(3).unwrap().timeline;
        assert!(younger.cross_start > blocked.cross_start);
        assert!(younger.fairness_waits + younger.yields >= 1);
        assert_eq!(report.violations(), vec![]);
    }

    #[test]
    fn crossing_time_follows_turn_kind() {
        let (report, _log) = run(vec![
            car(1, 0.0, North, West),
            car(2, 10.0, South, West),
            car(3, 20.0, East, East),
        ]);
        let held = |id| {
            let t = report.outcome(id).unwrap().timeline;
            t.cross_end - t.cross_start
        };
        // Left ≈ 5, straight ≈ 4, right ≈ 3; allow generous scheduling slack.
        assert!(held(1) > held(3));
        assert!(held(3) > held(2));
    }

    #[test]
    fn random_scenarios_complete_without_violations() {
        for seed in [1, 2, 3] {
            let specs = ScenarioGenerator::new(24, seed).gaps(0.3, 1.2).generate().unwrap();
            let mut sim = SimBuilder::new(specs).time_scale(0.004).build().unwrap();
            let mut log = EventLog::default();
            let report = sim.run(&mut log).unwrap();
            assert!(report.all_done(), "seed {seed}");
            assert_eq!(log.len(), 72);
            assert_eq!(report.violations(), vec![], "seed {seed}");
        }
    }
}

// ── Commit refused after collecting quadrants ───────────────────────────────

#[cfg(test)]
mod yield_tests {
    use super::*;
    use fw_core::Quadrant;

    use crate::{Agent, AgentOutcome, Intersection};

    /// Car 2 (north left: SW+NW+NE) stops after car 1 (east straight: NW+NE)
    /// but reaches the head of its line first, because a placeholder holds
    /// the east gate.  Car 2 takes NW, then blocks on NE, which a southbound
    /// placeholder holds.  Car 1 is let through its gate, starts waiting and
    /// blocks on NW, so when NE frees up car 2 must refuse its own commit,
    /// hand back NW+NE, and wait for car 1 while still holding the north gate.
    #[test]
    fn younger_car_gives_back_quadrants_at_commit() {
        let ctx = Intersection::new(test_config(), [East, North], EventLog::default());
        let mut older = Agent::new(AgentId(0), car(1, 0.0, East, East));
        let mut younger = Agent::new(AgentId(1), car(2, 0.5, North, West));

        ctx.regions.acquire(Quadrant::NE, South);
        let east_gate = ctx.gates.enter(East, AgentId(99));

        let (staged, older_front, (old_tl, young_tl)) = thread::scope(|s| {
            let a = s.spawn(|| older.run(&ctx));
            let b = s.spawn(|| younger.run(&ctx));

            let staged = eventually(|| {
                ctx.regions.snapshot(Quadrant::NW).owner == Some(North)
                    && ctx.tracker.status(AgentId(0)).stop_complete_time.is_some()
            });
            drop(east_gate);
            let older_front = eventually(|| ctx.tracker.status(AgentId(0)).at_front);
            ctx.regions.release(Quadrant::NE);

            let timelines = (a.join().unwrap(), b.join().unwrap());
            (staged, older_front, timelines)
        });
        assert!(staged, "car 2 should hold NW while car 1 sits behind the east gate");
        assert!(older_front, "car 1 should reach the head of the east line");

        assert_eq!(young_tl.yields, 1);
        assert_eq!(old_tl.yields, 0);
        assert!(old_tl.cross_start < young_tl.cross_start, "older car commits first");
        assert!(young_tl.cross_start >= old_tl.cross_end);
        assert!(young_tl.gate_released > old_tl.cross_start, "north gate kept through the yield");
        assert!(ctx.regions.is_idle());
        assert!(ctx.tracker.all_done());

        let statuses = ctx.tracker.snapshot();
        let elapsed_secs = ctx.clock.now();
        let log = ctx.into_sink();
        assert_eq!(log.len(), 6);
        let crossings: Vec<u32> = log
            .events
            .iter()
            .filter(|e| e.kind == EventKind::Crossing)
            .map(|e| e.car_id)
            .collect();
        assert_eq!(crossings, vec![1, 2]);

        let outcomes = [(&older, old_tl), (&younger, young_tl)]
            .into_iter()
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
        let report = RunReport { elapsed_secs, outcomes };
        assert_eq!(report.violations(), vec![]);
        assert_eq!(report.total_yields(), 1);
        // Stopped at ~2.5, committed only after car 1's 4 s straight crossing.
        assert!(report.outcome(2).unwrap().delay_secs() > 3.0);
    }
}

// ── Report checks on synthetic timelines ──────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use super::*;
    use crate::{AgentOutcome, AgentTimeline};
    use fw_sync::AgentStatus;

    fn outcome(spec: AgentSpec, stop: f64, front: f64, start: f64, end: f64) -> AgentOutcome {
        let mut status = AgentStatus::new(spec.origin);
        status.done = true;
        AgentOutcome {
            id: AgentId(spec.car_id),
            spec,
            turn: spec.turn(),
            regions: spec.regions(),
            timeline: AgentTimeline {
                stop_complete: stop,
                front_of_line: front,
                cross_start: start,
                gate_released: start,
                cross_end: end,
                ..AgentTimeline::default()
            },
            status,
        }
    }

    fn report(outcomes: Vec<AgentOutcome>) -> RunReport {
        RunReport { elapsed_secs: 0.0, outcomes }
    }

    #[test]
    fn detects_conflicting_overlap() {
        let r = report(vec![
            outcome(car(1, 0.0, South, East), 1.0, 1.0, 1.0, 6.0),
            outcome(car(2, 0.0, East, North), 2.0, 2.0, 3.0, 8.0),
        ]);
        assert!(r.violations().contains(&Violation::CrossingOverlap { first: 1, second: 2 }));
    }

    #[test]
    fn same_direction_overlap_is_allowed() {
        let r = report(vec![
            outcome(car(1, 0.0, North, North), 1.0, 1.0, 1.0, 5.0),
            outcome(car(2, 0.0, North, North), 1.5, 1.5, 1.5, 5.5),
        ]);
        assert_eq!(r.violations(), vec![]);
    }

    #[test]
    fn detects_gate_overlap() {
        let r = report(vec![
            outcome(car(1, 0.0, North, North), 1.0, 1.0, 3.0, 7.0),
            outcome(car(2, 0.0, North, North), 1.5, 2.0, 2.5, 6.5),
        ]);
        assert!(matches!(
            r.violations().as_slice(),
            [Violation::GateOverlap { direction: Direction::North, .. }]
        ));
    }

    #[test]
    fn detects_fairness_breach() {
        // Car 1 is older and waiting from t=1 to t=9; car 2 (disjoint path)
        // commits at t=4.
        let r = report(vec![
            outcome(car(1, 0.0, North, East), 1.0, 1.0, 9.0, 12.0),
            outcome(car(2, 0.0, South, West), 2.0, 2.0, 4.0, 7.0),
        ]);
        assert_eq!(
            r.violations(),
            vec![Violation::FairnessBreach { earlier: 1, later: 2 }]
        );
    }

    #[test]
    fn incomplete_agents_reported() {
        let mut stuck = outcome(car(4, 0.0, West, West), 1.0, 1.0, 0.0, 0.0);
        stuck.status.done = false;
        let r = report(vec![stuck]);
        assert_eq!(r.violations(), vec![Violation::Incomplete { car_id: 4 }]);
        assert!(!r.all_done());
    }

    #[test]
    fn violation_messages_name_the_cars() {
        let v = Violation::FairnessBreach { earlier: 3, later: 7 };
        assert_eq!(v.to_string(), "car 7 crossed while earlier car 3 was waiting");
    }
}

// ── Observers ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use crate::{CrossingEvent, SimObserver};

    #[derive(Default)]
    struct Counter {
        started: usize,
        events:  usize,
        ended:   bool,
    }

    impl SimObserver for Counter {
        fn on_sim_start(&mut self, agent_count: usize) {
            self.started = agent_count;
        }
        fn on_event(&mut self, _event: &CrossingEvent) {
            self.events += 1;
        }
        fn on_sim_end(&mut self, _elapsed_secs: f64) {
            self.ended = true;
        }
    }

    #[test]
    fn pair_fans_out_to_both() {
        let specs = vec![car(1, 0.0, North, East), car(2, 0.2, South, West)];
        let mut sim = SimBuilder::new(specs).config(test_config()).build().unwrap();
        let mut pair = (Counter::default(), EventLog::default());
        sim.run(&mut pair).unwrap();
        let (counter, log) = pair;
        assert_eq!(counter.started, 2);
        assert_eq!(counter.events, 6);
        assert!(counter.ended);
        assert_eq!(log.len(), 6);
        assert_eq!(log.events[0].kind, EventKind::Arriving);
        assert_eq!(log.events[0].car_id, 1);
    }
}
