//! Plain data row written by output backends.

use fw_sim::CrossingEvent;

/// One event, flattened to the columns every backend writes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventRow {
    pub time_secs: f64,
    pub car_id:    u32,
    /// Direction symbol (`^ v > <`).
    pub origin:    char,
    pub target:    char,
    /// `arriving`, `crossing`, or `exiting`.
    pub event:     &'static str,
}

impl From<&CrossingEvent> for EventRow {
    fn from(e: &CrossingEvent) -> Self {
        Self {
            time_secs: e.time_secs,
            car_id:    e.car_id,
            origin:    e.origin.symbol(),
            target:    e.target.symbol(),
            event:     e.kind.label(),
        }
    }
}
