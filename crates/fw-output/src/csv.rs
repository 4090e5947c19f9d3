//! CSV output backend.
//!
//! [`CsvWriter::create`] writes `events.csv` in the given directory.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use ::csv::Writer;

use crate::writer::EventWriter;
use crate::{EventRow, OutputResult};

/// Header row of every event log.
pub const EVENT_COLUMNS: [&str; 5] = ["time_secs", "car_id", "origin", "target", "event"];

/// Writes one CSV row per event.
pub struct CsvWriter<W: Write = File> {
    events:   Writer<W>,
    finished: bool,
}

impl CsvWriter<File> {
    /// Create (or truncate) `events.csv` in `dir` and write the header row.
    pub fn create(dir: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(dir.join("events.csv"))?)
    }
}

impl<W: Write> CsvWriter<W> {
    /// Wrap any writer.  The header row is written immediately.
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        let mut events = Writer::from_writer(inner);
        events.write_record(EVENT_COLUMNS)?;
        Ok(Self { events, finished: false })
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> OutputResult<W> {
        self.events.into_inner().map_err(|e| e.into_error().into())
    }
}

impl<W: Write + Send> EventWriter for CsvWriter<W> {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.events.write_record(&[
            format!("{:.3}", row.time_secs),
            row.car_id.to_string(),
            row.origin.to_string(),
            row.target.to_string(),
            row.event.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.events.flush()?;
        Ok(())
    }
}
