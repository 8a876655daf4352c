use thiserror::Error;

use vs_core::CoreError;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("input parse error: {0}")]
    Parse(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type InputResult<T> = Result<T, InputError>;
