//! Per-run results and after-the-fact protocol checks.
//!
//! Every timestamp is in simulated seconds.  `front_of_line`, `cross_start`
//! and `cross_end` are read under the tracker lock together with the flag
//! change they describe, so comparing them across agents is sound.

use std::fmt;

use fw_core::{AgentId, Direction, RegionSet, TurnKind};
use fw_schedule::AgentSpec;
use fw_sync::AgentStatus;

/// What one agent recorded on its way through.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AgentTimeline {
    /// "arriving" was logged.
    pub arrived:        f64,
    /// Stop pause finished; the car's fairness priority.
    pub stop_complete:  f64,
    /// Approach gate taken and front/waiting flags set.
    pub front_of_line:  f64,
    /// All quadrants held and crossing committed.
    pub cross_start:    f64,
    /// Approach gate handed to the next car on this approach.
    pub gate_released:  f64,
    /// Crossing flag cleared, just before the quadrants were released.
    pub cross_end:      f64,
    /// "exiting" was logged.
    pub exited:         f64,
    /// Times the car was woken and still had to defer to an older car.
    pub fairness_waits: u32,
    /// Times the car gave back a full set of quadrants at commit.
    pub yields:         u32,
}

#[derive(Clone, Debug)]
pub struct AgentOutcome {
    pub id:       AgentId,
    pub spec:     AgentSpec,
    pub turn:     TurnKind,
    pub regions:  RegionSet,
    pub timeline: AgentTimeline,
    /// Final flags from the tracker.
    pub status:   AgentStatus,
}

impl AgentOutcome {
    /// Seconds between finishing the stop pause and committing to cross.
    pub fn delay_secs(&self) -> f64 {
        self.timeline.cross_start - self.timeline.stop_complete
    }
}

/// A broken protocol property found in a finished run.
#[derive(Clone, Debug, PartialEq)]
pub enum Violation {
    /// Two cars from different approaches with intersecting quadrant sets
    /// were crossing at the same time.
    CrossingOverlap { first: u32, second: u32 },
    /// Two cars held the same approach gate at the same time.
    GateOverlap { direction: Direction, first: u32, second: u32 },
    /// `later` committed while `earlier` (older, other approach) was stuck
    /// waiting at the head of its line.
    FairnessBreach { earlier: u32, later: u32 },
    /// The car never reached `done`.
    Incomplete { car_id: u32 },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::CrossingOverlap { first, second } => {
                write!(f, "cars {first} and {second} crossed conflicting quadrants together")
            }
            Violation::GateOverlap { direction, first, second } => {
                write!(f, "cars {first} and {second} held the {direction} gate together")
            }
            Violation::FairnessBreach { earlier, later } => {
                write!(f, "car {later} crossed while earlier car {earlier} was waiting")
            }
            Violation::Incomplete { car_id } => write!(f, "car {car_id} never exited"),
        }
    }
}

/// Result of [`Sim::run`][crate::Sim::run].
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Simulated seconds from clock start until the last thread was joined.
    pub elapsed_secs: f64,
    /// One entry per agent, in `AgentId` order.
    pub outcomes:     Vec<AgentOutcome>,
}

impl RunReport {
    pub fn outcome(&self, car_id: u32) -> Option<&AgentOutcome> {
        self.outcomes.iter().find(|o| o.spec.car_id == car_id)
    }

    pub fn all_done(&self) -> bool {
        self.outcomes.iter().all(|o| o.status.done)
    }

    pub fn total_yields(&self) -> u32 {
        self.outcomes.iter().map(|o| o.timeline.yields).sum()
    }

    /// Check every pairwise property of the run.  Empty means clean.
    pub fn violations(&self) -> Vec<Violation> {
        let mut found: Vec<Violation> = self
            .outcomes
            .iter()
            .filter(|o| !o.status.done)
            .map(|o| Violation::Incomplete { car_id: o.spec.car_id })
            .collect();

        let done: Vec<&AgentOutcome> = self.outcomes.iter().filter(|o| o.status.done).collect();
        for (i, a) in done.iter().enumerate() {
            for b in &done[i + 1..] {
                check_pair(a, b, &mut found);
            }
        }
        found
    }
}

fn overlaps(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

fn check_pair(a: &AgentOutcome, b: &AgentOutcome, found: &mut Vec<Violation>) {
    let (ta, tb) = (&a.timeline, &b.timeline);
    let (ida, idb) = (a.spec.car_id, b.spec.car_id);

    if a.spec.origin == b.spec.origin {
        if overlaps((ta.front_of_line, ta.gate_released), (tb.front_of_line, tb.gate_released)) {
            found.push(Violation::GateOverlap { direction: a.spec.origin, first: ida, second: idb });
        }
        return;
    }

    if a.regions.intersects(b.regions)
        && overlaps((ta.cross_start, ta.cross_end), (tb.cross_start, tb.cross_end))
    {
        found.push(Violation::CrossingOverlap { first: ida, second: idb });
    }

    // Order the pair by stop-completion; ties carry no priority.
    let (older, younger) = if ta.stop_complete < tb.stop_complete {
        (a, b)
    } else if tb.stop_complete < ta.stop_complete {
        (b, a)
    } else {
        return;
    };
    let commit = younger.timeline.cross_start;
    if older.timeline.front_of_line < commit && commit < older.timeline.cross_start {
        found.push(Violation::FairnessBreach {
            earlier: older.spec.car_id,
            later:   younger.spec.car_id,
        });
    }
}
