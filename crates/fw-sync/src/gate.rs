//! Per-approach head-of-line gates.
//!
//! Each approach has one gate.  A car takes the gate after its stop pause
//! and keeps it until it has committed to crossing, so at most one car per
//! approach is ever contending for quadrants.
//!
//! The gate is a ticket lock: cars are served in the order they asked for it.

use fw_core::{AgentId, Direction};
use parking_lot::{Condvar, Mutex};

#[derive(Default)]
struct GateState {
    next_ticket: u64,
    serving:     u64,
    holder:      Option<AgentId>,
}

#[derive(Default)]
struct Gate {
    state: Mutex<GateState>,
    turn:  Condvar,
}

/// One FIFO gate per [`Direction`].
#[derive(Default)]
pub struct ApproachGates {
    gates: [Gate; 4],
}

impl ApproachGates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `agent` at the `direction` gate and block until it is at the
    /// head of the line.
    pub fn enter(&self, direction: Direction, agent: AgentId) -> GateGuard<'_> {
        let gate = &self.gates[direction.index()];
        let mut state = gate.state.lock();
        let ticket = state.next_ticket;
        state.next_ticket += 1;
        while state.serving != ticket {
            gate.turn.wait(&mut state);
        }
        state.holder = Some(agent);
        tracing::debug!(%direction, agent = agent.0, ticket, "approach gate entered");
        GateGuard { gates: self, direction }
    }

    /// The agent currently at the head of `direction`, if any.
    pub fn holder(&self, direction: Direction) -> Option<AgentId> {
        self.gates[direction.index()].state.lock().holder
    }

    /// Cars queued behind the current holder of `direction`.
    pub fn queued(&self, direction: Direction) -> u64 {
        let state = self.gates[direction.index()].state.lock();
        let in_line = state.next_ticket - state.serving;
        in_line.saturating_sub(u64::from(state.holder.is_some()))
    }

    fn leave(&self, direction: Direction) {
        let gate = &self.gates[direction.index()];
        let mut state = gate.state.lock();
        state.holder = None;
        state.serving += 1;
        gate.turn.notify_all();
    }
}

/// Proof of holding an approach gate.  Opens the gate for the next car on drop.
#[must_use = "dropping a GateGuard opens the gate immediately"]
pub struct GateGuard<'a> {
    gates:     &'a ApproachGates,
    direction: Direction,
}

impl GateGuard<'_> {
    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl Drop for GateGuard<'_> {
    fn drop(&mut self) {
        self.gates.leave(self.direction);
    }
}
