//! Error types for controller operations.

use mp_core::CoreError;
use thiserror::Error;

/// Result type for controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while configuring or stepping a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// Invalid argument provided to a controller function.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// A gear outside the throttle table was supplied.
    #[error("Index out of bounds: {what} (index={index}, len={len})")]
    IndexOob {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// Numeric or limits error from the core layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}
