//! Network-subsystem error type.

use thiserror::Error;

use ta_core::TaError;

/// Errors produced by `ta-network`.
///
/// Malformed individual records are never errors (they are skipped by the
/// loader); only unreadable inputs are.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] TaError),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
