//! Pipeline error types.

use pw_oracle::OracleError;
use thiserror::Error;

/// Errors that abort a pipeline pass.
///
/// Unparseable oracle replies are not errors; they degrade to the fail-safe
/// defaults inside each stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("oracle call failed: {0}")]
    Oracle(#[from] OracleError),
}

/// Convenience alias for pipeline results.
pub type RecommendResult<T> = Result<T, PipelineError>;
