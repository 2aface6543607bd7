use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures of the food log store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode records for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: BoxError,
    },
    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: BoxError,
    },
    #[error("stored value for '{key}' is unreadable: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("stored value for '{key}' has unsupported version {version}")]
    UnsupportedVersion { key: String, version: u32 },
}

/// Rejected user input for a new food record.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("food name must not be blank")]
    BlankName,
    #[error("calories '{0}' is not a number")]
    InvalidCalories(String),
    #[error("calories must be positive, got {0}")]
    NonPositiveCalories(f64),
}

/// Failures loading bundled static content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content: {0}")]
    Parse(#[from] serde_json::Error),
}
