//! Strongly typed agent identifier.
//!
//! `AgentId` is the dense index of an agent in the simulation's fixed agent
//! table (`0..agent_count`).  It is distinct from the scenario's `car_id`
//! label, which is arbitrary and only used for reporting.

use std::fmt;

/// Index of an agent in the shared status table.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct AgentId(pub u32);

impl AgentId {
    /// Cast to `usize` for direct use as a table index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl From<AgentId> for usize {
    #[inline(always)]
    fn from(id: AgentId) -> usize {
        id.0 as usize
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<AgentId, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}
