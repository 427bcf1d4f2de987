//! Error types.
//!
//! Impossible motions and unrecognized keys are not errors: the command is
//! dropped and the engine returns to Normal mode. Errors only come from the
//! host or the system clipboard.

use thiserror::Error;

/// Failure reported by a [`Host`](crate::traits::Host) operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("edit rejected: {0}")]
    EditRejected(String),

    #[error("selection rejected: {0}")]
    SelectionRejected(String),

    #[error("not supported by host: {0}")]
    Unsupported(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("host operation failed: {0}")]
    Host(#[from] HostError),

    #[cfg(feature = "clipboard")]
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
