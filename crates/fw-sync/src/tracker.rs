//! Arrival-order tracker.
//!
//! One lock-protected table holds the coordination flags of every agent in
//! the run.  Agents only ever write their own row but read every row when
//! deciding whether an older car on another approach is still stuck.  Any
//! flag change that could unblock someone is followed by a broadcast on the
//! `changed` condvar.
//!
//! Timestamps that correspond to a flag change are read from the clock while
//! the table lock is held, so their order matches the order in which other
//! agents observed the change.

use fw_core::{AgentId, Direction, SimClock};
use parking_lot::{Condvar, Mutex};

// ── AgentStatus ───────────────────────────────────────────────────────────────

/// Coordination flags for one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentStatus {
    pub origin: Direction,
    /// Simulated time at which the stop pause ended; `None` until then.
    pub stop_complete_time: Option<f64>,
    pub at_front: bool,
    pub waiting:  bool,
    pub crossing: bool,
    pub done:     bool,
}

impl AgentStatus {
    pub fn new(origin: Direction) -> Self {
        Self {
            origin,
            stop_complete_time: None,
            at_front: false,
            waiting:  false,
            crossing: false,
            done:     false,
        }
    }

    /// At the head of its approach, asking for entry, and not yet crossing.
    #[inline]
    pub fn is_stuck_waiting(&self) -> bool {
        !self.done && self.at_front && self.waiting && !self.crossing
    }
}

// ── Fairness predicate ────────────────────────────────────────────────────────

/// The first agent on a different approach that finished its stop strictly
/// before `agent` and is still stuck waiting at the head of its line.
pub fn first_earlier_waiter(table: &[AgentStatus], agent: AgentId) -> Option<AgentId> {
    let me = &table[agent.index()];
    let my_stop = me.stop_complete_time?;
    table
        .iter()
        .enumerate()
        .find(|&(i, other)| {
            i != agent.index()
                && other.origin != me.origin
                && other.stop_complete_time.is_some_and(|t| t < my_stop)
                && other.is_stuck_waiting()
        })
        .map(|(i, _)| AgentId(i as u32))
}

/// `true` while some older cross-direction agent is stuck waiting, in which
/// case `agent` must not try to take quadrants.
#[inline]
pub fn earlier_agent_waiting(table: &[AgentStatus], agent: AgentId) -> bool {
    first_earlier_waiter(table, agent).is_some()
}

// ── ArrivalTracker ────────────────────────────────────────────────────────────

/// Shared status table for a fixed set of agents, indexed by [`AgentId`].
pub struct ArrivalTracker {
    table:   Mutex<Vec<AgentStatus>>,
    changed: Condvar,
}

impl ArrivalTracker {
    /// One row per origin, in `AgentId` order.
    pub fn new(origins: impl IntoIterator<Item = Direction>) -> Self {
        Self {
            table:   Mutex::new(origins.into_iter().map(AgentStatus::new).collect()),
            changed: Condvar::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.table.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stamp the end of `agent`'s stop pause.  Returns the recorded time.
    pub fn record_stop_complete(&self, agent: AgentId, clock: &SimClock) -> f64 {
        let mut table = self.table.lock();
        let now = clock.now();
        table[agent.index()].stop_complete_time = Some(now);
        now
    }

    /// `agent` now holds its approach gate and is asking for entry.
    pub fn mark_front_and_waiting(&self, agent: AgentId, clock: &SimClock) -> f64 {
        let mut table = self.table.lock();
        let now = clock.now();
        let row = &mut table[agent.index()];
        row.at_front = true;
        row.waiting  = true;
        self.changed.notify_all();
        now
    }

    /// Block while an older cross-direction agent is stuck waiting.
    ///
    /// Returns how many times the agent was woken and had to keep waiting.
    pub fn wait_for_turn(&self, agent: AgentId) -> u32 {
        let mut table = self.table.lock();
        let mut rounds = 0;
        while let Some(blocker) = first_earlier_waiter(&table, agent) {
            tracing::debug!(agent = agent.0, blocker = blocker.0, "deferring to earlier waiter");
            self.changed.wait(&mut table);
            rounds += 1;
        }
        rounds
    }

    /// Commit `agent` to crossing if no older cross-direction agent is stuck
    /// waiting.  On success returns the commit time and wakes everyone; on
    /// `None` the caller must give back its quadrants and wait again.
    pub fn try_begin_crossing(&self, agent: AgentId, clock: &SimClock) -> Option<f64> {
        let mut table = self.table.lock();
        if earlier_agent_waiting(&table, agent) {
            return None;
        }
        let now = clock.now();
        let row = &mut table[agent.index()];
        row.waiting  = false;
        row.crossing = true;
        self.changed.notify_all();
        Some(now)
    }

    /// `agent` has left its quadrants' critical section.
    pub fn finish_crossing(&self, agent: AgentId, clock: &SimClock) -> f64 {
        let mut table = self.table.lock();
        let now = clock.now();
        table[agent.index()].crossing = false;
        now
    }

    /// `agent` has exited; it no longer takes part in fairness checks.
    pub fn mark_done(&self, agent: AgentId) {
        let mut table = self.table.lock();
        let row = &mut table[agent.index()];
        row.done     = true;
        row.at_front = false;
        self.changed.notify_all();
    }

    pub fn status(&self, agent: AgentId) -> AgentStatus {
        self.table.lock()[agent.index()]
    }

    /// Copy of the whole table.
    pub fn snapshot(&self) -> Vec<AgentStatus> {
        self.table.lock().clone()
    }

    pub fn all_done(&self) -> bool {
        self.table.lock().iter().all(|s| s.done)
    }
}
