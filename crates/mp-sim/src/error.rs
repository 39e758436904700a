//! Error types for closed-loop simulation.

use thiserror::Error;

/// Errors encountered while running a closed-loop simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Controller failed at step {step}: {source}")]
    Control {
        step: usize,
        #[source]
        source: mp_controls::ControlError,
    },

    #[error(transparent)]
    Setup(#[from] mp_controls::ControlError),

    #[error(transparent)]
    Core(#[from] mp_core::CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
