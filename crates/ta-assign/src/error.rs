use rayon::ThreadPoolBuildError;
use thiserror::Error;

use ta_core::TaError;

#[derive(Debug, Error)]
pub enum AssignError {
    #[error(transparent)]
    Core(#[from] TaError),

    #[error("network carries {network} demand period(s), settings define {settings}")]
    PeriodMismatch { network: usize, settings: usize },

    #[error("demand key {key} refers to an undefined {what}")]
    UndefinedKey { key: String, what: &'static str },

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] ThreadPoolBuildError),
}

pub type AssignResult<T> = Result<T, AssignError>;
