//! Shared per-run state handed by reference to every agent thread.

use fw_core::{AgentId, CrossingConfig, Direction, SimClock};
use fw_schedule::AgentSpec;
use fw_sync::{ApproachGates, ArrivalTracker, RegionLocks};
use parking_lot::Mutex;

use crate::{CrossingEvent, EventKind, SimObserver};

/// Everything the agents of one run coordinate through.
///
/// Built at the start of [`Sim::run`][crate::Sim::run] and dropped when the
/// last agent thread has been joined.  Also usable directly to drive agents
/// by hand in tests.
pub struct Intersection<S: SimObserver> {
    pub clock:   SimClock,
    pub config:  CrossingConfig,
    pub regions: RegionLocks,
    pub gates:   ApproachGates,
    pub tracker: ArrivalTracker,
    sink:        Mutex<S>,
}

impl<S: SimObserver> Intersection<S> {
    /// Fresh locks and status rows for agents with the given origins (in
    /// `AgentId` order).  The clock starts now.
    pub fn new(
        config:  CrossingConfig,
        origins: impl IntoIterator<Item = Direction>,
        sink:    S,
    ) -> Self {
        Self {
            clock:   config.start_clock(),
            regions: RegionLocks::new(),
            gates:   ApproachGates::new(),
            tracker: ArrivalTracker::new(origins),
            sink:    Mutex::new(sink),
            config,
        }
    }

    /// Timestamp and deliver one event.  Returns the timestamp.
    pub fn emit(&self, agent: AgentId, spec: &AgentSpec, kind: EventKind) -> f64 {
        let mut sink = self.sink.lock();
        let time_secs = self.clock.now();
        sink.on_event(&CrossingEvent {
            time_secs,
            agent,
            car_id: spec.car_id,
            origin: spec.origin,
            target: spec.target,
            kind,
        });
        time_secs
    }

    pub fn into_sink(self) -> S {
        self.sink.into_inner()
    }
}
