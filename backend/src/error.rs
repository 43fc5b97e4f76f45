//! Library error type.
//!
//! HTTP handlers convert these into `AppError` (see `http::error`); the server
//! binary wraps them in `anyhow`.

use thiserror::Error;

use crate::chat::provider::ProviderError;

#[derive(Debug, Error)]
pub enum FloatChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("History lock error on {path}: {source}")]
    Lock {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

pub type FloatChatResult<T> = Result<T, FloatChatError>;
