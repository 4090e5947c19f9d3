//! Framework error type.
//!
//! Everything here is a configuration error: it is raised while a scenario or
//! config is being built, never while agents are crossing.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("invalid direction {0:?}: expected one of ^ v > < (or N S E W)")]
    InvalidDirection(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `fw-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
