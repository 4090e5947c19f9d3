//! `fw-output` — event log writers for the fourway crossing coordinator.
//!
//! Two backends are provided:
//!
//! | Backend          | Output                                                   |
//! |------------------|----------------------------------------------------------|
//! | `ConsoleWriter`  | `Time 3.1: Car 1 (^ ^) crossing` lines on any `Write`    |
//! | `CsvWriter`      | `events.csv` with `time_secs,car_id,origin,target,event` |
//!
//! Both implement [`EventWriter`] and are driven by [`EventOutputObserver`],
//! which implements `fw_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fw_output::{ConsoleWriter, CsvWriter, EventOutputObserver};
//!
//! let console = EventOutputObserver::new(ConsoleWriter::stdout());
//! let csv = EventOutputObserver::new(CsvWriter::create(Path::new("./output"))?);
//! let mut obs = (console, csv);
//! sim.run(&mut obs)?;
//! obs.1.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod console;
pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use console::ConsoleWriter;
pub use self::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::EventOutputObserver;
pub use row::EventRow;
pub use writer::EventWriter;
