//! CSV scenario loader.
//!
//! # CSV format
//!
//! One row per car.  Direction columns take `^ v > <` or `N S E W`.
//!
//! ```csv
//! car_id,arrival_secs,origin,target
//! 1,1.1,^,^
//! 2,2.2,^,^
//! 3,3.3,^,<
//! 4,4.4,v,v
//! ```
//!
//! Rows are returned in file order, which becomes `AgentId` order.  Duplicate
//! `car_id`s are accepted here and rejected by `fw_sim::SimBuilder`.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{AgentSpec, ScheduleError, ScheduleResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScenarioRecord {
    car_id:       u32,
    arrival_secs: f64,
    origin:       String,
    target:       String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a scenario from a CSV file.
pub fn load_scenario_csv(path: &Path) -> ScheduleResult<Vec<AgentSpec>> {
    let file = std::fs::File::open(path).map_err(ScheduleError::Io)?;
    load_scenario_reader(file)
}

/// Like [`load_scenario_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedding a scenario in
/// a binary.
pub fn load_scenario_reader<R: Read>(reader: R) -> ScheduleResult<Vec<AgentSpec>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    csv_reader
        .deserialize::<ScenarioRecord>()
        .map(|result| {
            let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
            AgentSpec::parse(row.car_id, row.arrival_secs, &row.origin, &row.target)
        })
        .collect()
}
