//! Application error types

use lexicon_domain::DomainError;
use thiserror::Error;

use crate::ports::SourceError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// The content source could not deliver a snapshot. Not retried.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] SourceError),

    /// A domain error stopped the pipeline.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// An export artifact could not be produced.
    #[error("export error: {0}")]
    Export(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
