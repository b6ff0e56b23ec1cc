//! Session error types

use thiserror::Error;

/// Errors surfaced synchronously by the session.
///
/// Transport failures are not among them: connection establishment is
/// asynchronous and its failures are observed only as state transitions.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Document ID is required to open a session")]
    MissingDocumentId,

    #[error("Auth token is required to open a session")]
    MissingToken,
}

/// Result type for session operations
pub type SessionResult<T> = Result<T, SessionError>;
