//! `fw-schedule` — who arrives when, heading where.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`scenario`]  | `AgentSpec`, `sample_scenario`                          |
//! | [`loader`]    | `load_scenario_csv`, `load_scenario_reader`             |
//! | [`generator`] | `ScenarioGenerator` (seeded random arrivals)            |
//! | [`error`]     | `ScheduleError`, `ScheduleResult<T>`                    |
//!
//! A scenario is a plain `Vec<AgentSpec>`; its order becomes the agents'
//! `AgentId` order in the simulation.

pub mod error;
pub mod generator;
pub mod loader;
pub mod scenario;


pub use error::{ScheduleError, ScheduleResult};
pub use generator::ScenarioGenerator;
pub use loader::{load_scenario_csv, load_scenario_reader};
pub use scenario::{sample_scenario, AgentSpec};
