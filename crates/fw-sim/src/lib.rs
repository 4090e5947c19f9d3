//! `fw-sim` — runs one thread per car through the crossing protocol.
//!
//! # Agent lifecycle
//!
//! ```text
//! Scheduled ─▶ Approaching ─▶ WaitingAtFront ─▶ Crossing ─▶ Exited
//!   sleep until    log "arriving",   take approach gate,   take quadrants
//!   arrival        stop pause,       flag front+waiting,   (ascending), commit,
//!                  stamp stop        wait out older        open gate, log
//!                                    cross-direction cars  "crossing", hold,
//!                                                          release (descending),
//!                                                          log "exiting"
//! ```
//!
//! If an older car on another approach starts waiting while a car is still
//! collecting quadrants, the commit is refused: the car gives its quadrants
//! back and returns to the fairness wait, keeping its approach gate.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fw_core::CrossingConfig;
//! use fw_schedule::sample_scenario;
//! use fw_sim::{EventLog, SimBuilder};
//!
//! let mut sim = SimBuilder::new(sample_scenario())
//!     .config(CrossingConfig::default().with_time_scale(0.01))
//!     .build()?;
//! let mut log = EventLog::default();
//! let report = sim.run(&mut log)?;
//! assert!(report.violations().is_empty());
//! ```

pub mod agent;
pub mod builder;
pub mod context;
pub mod error;
pub mod observer;
pub mod report;
pub mod sim;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentPhase};
pub use builder::SimBuilder;
pub use context::Intersection;
pub use error::{SimError, SimResult};
pub use observer::{CrossingEvent, EventKind, EventLog, NoopObserver, SimObserver};
pub use report::{AgentOutcome, AgentTimeline, RunReport, Violation};
pub use sim::Sim;
