//! `fw-sync` — the coordination primitives every agent thread shares.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`region`]  | `RegionLocks`, `RegionClaim`, `RegionSnapshot`               |
//! | [`gate`]    | `ApproachGates`, `GateGuard`                                 |
//! | [`tracker`] | `ArrivalTracker`, `AgentStatus`, fairness predicate          |
//!
//! # Lock order
//!
//! ```text
//! approach gate  →  tracker lock (short, never held while blocking on a region)
//!                →  quadrant locks in ascending Quadrant index
//! ```
//!
//! Every blocking wait is unconditional: there are no timeouts and no error
//! returns.  A scenario that can never make progress hangs.

pub mod gate;
pub mod region;
pub mod tracker;


pub use gate::{ApproachGates, GateGuard};
pub use region::{RegionClaim, RegionLocks, RegionSnapshot};
pub use tracker::{earlier_agent_waiting, first_earlier_waiter, AgentStatus, ArrivalTracker};
