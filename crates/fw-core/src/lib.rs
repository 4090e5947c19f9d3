//! `fw-core` — foundational types for the `fourway` intersection coordinator.
//!
//! This crate is a dependency of every other `fw-*` crate.  It has no `fw-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`ids`]      | `AgentId`                                                  |
//! | [`geometry`] | `Direction`, `Quadrant`, `TurnKind`, `RegionSet`           |
//! | [`time`]     | `SimClock`, `CrossingConfig`                               |
//! | [`error`]    | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to geometry enums and config. |

pub mod error;
pub mod geometry;
pub mod ids;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geometry::{Direction, Quadrant, RegionSet, TurnKind};
pub use ids::AgentId;
pub use time::{CrossingConfig, SimClock};
