//! `EventOutputObserver<W>` — bridges `SimObserver` to an `EventWriter`.

use fw_sim::{CrossingEvent, SimObserver};

use crate::writer::EventWriter;
use crate::{EventRow, OutputError, OutputResult};

/// A [`SimObserver`] that forwards every crossing event to an
/// [`EventWriter`] backend.
///
/// `SimObserver` methods have no return value, so the first write error is
/// stored and later writes are still attempted.  Check it with
/// [`take_error`][Self::take_error] once `sim.run()` returns.
pub struct EventOutputObserver<W: EventWriter> {
    writer:     W,
    written:    usize,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> EventOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Events successfully handed to the writer.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "event output failed; later errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: EventWriter> SimObserver for EventOutputObserver<W> {
    fn on_event(&mut self, event: &CrossingEvent) {
        let result = self.writer.write_event(&EventRow::from(event));
        if result.is_ok() {
            self.written += 1;
        }
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _elapsed_secs: f64) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
