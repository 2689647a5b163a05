use thiserror::Error;

use ta_core::TaError;

#[derive(Debug, Error)]
pub enum DemandError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] TaError),
}

pub type DemandResult<T> = Result<T, DemandError>;
