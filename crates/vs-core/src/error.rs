//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via a `From` impl.

use thiserror::Error;

/// The error type for `vs-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `vs-core`.
pub type CoreResult<T> = Result<T, CoreError>;
