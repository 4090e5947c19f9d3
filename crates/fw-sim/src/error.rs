use fw_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("scenario has no cars")]
    EmptyScenario,

    #[error("car id {0} appears more than once in the scenario")]
    DuplicateCar(u32),

    #[error("car {car_id}: arrival time must be finite and non-negative, got {arrival_secs}")]
    InvalidArrival { car_id: u32, arrival_secs: f64 },

    #[error("scenario has {0} cars, more than the agent table can index")]
    TooManyAgents(usize),

    #[error("failed to spawn thread for car {car_id}: {source}")]
    Spawn {
        car_id: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("thread for car {car_id} panicked")]
    AgentPanicked { car_id: u32 },
}

pub type SimResult<T> = Result<T, SimError>;
