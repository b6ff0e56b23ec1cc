//! REST client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Response contained no data")]
    MissingData,
}

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;
