use fw_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("scenario parse error: {0}")]
    Parse(String),

    #[error("car {car_id}: {source}")]
    Direction {
        car_id: u32,
        #[source]
        source: CoreError,
    },

    #[error("car {car_id}: arrival time must be finite and non-negative, got {arrival_secs}")]
    Arrival { car_id: u32, arrival_secs: f64 },

    #[error("scenario generator: {0}")]
    Generator(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
