//! The `EventWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult};

/// Trait implemented by the console and CSV writers.
///
/// Errors are stored by [`EventOutputObserver`][crate::EventOutputObserver]
/// and retrieved with `take_error` after the run.
pub trait EventWriter: Send {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Flush buffered rows.  Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
