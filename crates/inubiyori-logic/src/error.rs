//! Errors raised when outside input does not map onto the simulation.

use thiserror::Error;

/// Rejected input at the parse boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("unknown species: {0:?}")]
    UnknownSpecies(String),
    #[error("unknown action: {0:?}")]
    UnknownAction(String),
    #[error("name {name:?} is longer than {max} characters")]
    NameTooLong { name: String, max: usize },
    #[error("seconds per simulated day must be positive and finite, got {0}")]
    InvalidDayLength(f64),
}
