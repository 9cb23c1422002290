//! Oracle error types.

use thiserror::Error;

/// Errors raised while talking to an oracle backend.
///
/// These are transport-level faults. The pipeline does not recover from
/// them; a reply that arrives but cannot be decoded is not an error here.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("oracle returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("oracle returned an empty response")]
    EmptyResponse,

    #[error("unexpected response body: {0}")]
    Body(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Convenience alias for oracle results.
pub type OracleResult<T> = Result<T, OracleError>;
