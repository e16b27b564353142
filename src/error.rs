//! Error Types
//!
//! One enum per boundary: document ingestion, form input, persistence, settings.

use thiserror::Error;

/// Errors reading or writing the menu document
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("unrecognized document shape (expected an item list or an object with \"items\")")]
    UnrecognizedShape,

    #[error("failed to serialize catalog: {0}")]
    Serialize(String),
}

/// User input validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("\"{0}\" is reserved for the all-items tab")]
    ReservedCategory(String),
}

/// Persistence adapter failures
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyncError {
    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("storage unavailable: {0}")]
    Storage(String),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

pub type SyncResult<T> = Result<T, SyncError>;

/// Invalid runtime settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("unknown backend {0:?} (expected file, local or cloud)")]
    UnknownBackend(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("cloud backend requires {0}")]
    MissingCloudParameter(&'static str),
}
