// crates/divisions-core/src/error.rs
use thiserror::Error;

/// Errors raised while loading or persisting a dataset.
///
/// Lookups and searches never fail: an unknown id yields `None` or an empty
/// list, so this type only surfaces at the I/O and parsing boundary.
#[derive(Debug, Error)]
pub enum DivisionError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("unknown level: {0}")]
    UnknownLevel(String),
}

pub type Result<T> = std::result::Result<T, DivisionError>;
