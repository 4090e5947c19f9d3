//! Human-readable log lines.

use std::io::{self, Stdout, Write};

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult};

/// Prints `Time 3.1: Car 1 (^ ^) crossing`, one line per event, flushed
/// after every line so interleaving with other output stays readable.
pub struct ConsoleWriter<W: Write = Stdout> {
    out: W,
}

impl ConsoleWriter<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Format one event the way [`ConsoleWriter`] prints it (no newline).
pub fn format_line(row: &EventRow) -> String {
    format!(
        "Time {:.1}: Car {} ({} {}) {}",
        row.time_secs, row.car_id, row.origin, row.target, row.event
    )
}

impl<W: Write + Send> EventWriter for ConsoleWriter<W> {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        writeln!(self.out, "{}", format_line(row))?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.out.flush()?;
        Ok(())
    }
}
