//! Event sink trait for the crossing log.

use std::fmt;

use fw_core::{AgentId, Direction};

/// The three externally visible milestones of a car.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arriving,
    Crossing,
    Exiting,
}

impl EventKind {
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Arriving => "arriving",
            EventKind::Crossing => "crossing",
            EventKind::Exiting  => "exiting",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line of the crossing log.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CrossingEvent {
    /// Simulated seconds since the run started.
    pub time_secs: f64,
    pub agent:     AgentId,
    pub car_id:    u32,
    pub origin:    Direction,
    pub target:    Direction,
    pub kind:      EventKind,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run].
///
/// `on_event` is called from agent threads, one call at a time: the run holds
/// a single lock around the sink and reads the event timestamp under it, so
/// events arrive in timestamp order.
///
/// All methods have default no-op implementations.
pub trait SimObserver: Send {
    /// Called once before any agent thread starts.
    fn on_sim_start(&mut self, _agent_count: usize) {}

    fn on_event(&mut self, _event: &CrossingEvent) {}

    /// Called once after every agent thread has been joined.
    fn on_sim_end(&mut self, _elapsed_secs: f64) {}
}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_sim_start(&mut self, agent_count: usize) {
        (**self).on_sim_start(agent_count);
    }

    fn on_event(&mut self, event: &CrossingEvent) {
        (**self).on_event(event);
    }

    fn on_sim_end(&mut self, elapsed_secs: f64) {
        (**self).on_sim_end(elapsed_secs);
    }
}

/// Fan out to two observers, first `A` then `B`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_sim_start(&mut self, agent_count: usize) {
        self.0.on_sim_start(agent_count);
        self.1.on_sim_start(agent_count);
    }

    fn on_event(&mut self, event: &CrossingEvent) {
        self.0.on_event(event);
        self.1.on_event(event);
    }

    fn on_sim_end(&mut self, elapsed_secs: f64) {
        self.0.on_sim_end(elapsed_secs);
        self.1.on_sim_end(elapsed_secs);
    }
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Keeps every event in memory, in emission order.
#[derive(Default, Debug)]
pub struct EventLog {
    pub events: Vec<CrossingEvent>,
}

impl EventLog {
    /// Events for one car, in order.
    pub fn for_car(&self, car_id: u32) -> Vec<CrossingEvent> {
        self.events
            .iter()
            .filter(|e| e.car_id == car_id)
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl SimObserver for EventLog {
    fn on_sim_start(&mut self, agent_count: usize) {
        self.events.clear();
        self.events.reserve(agent_count * 3);
    }

    fn on_event(&mut self, event: &CrossingEvent) {
        self.events.push(*event);
    }
}
