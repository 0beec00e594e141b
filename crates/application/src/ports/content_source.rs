//! Content source port.

use lexicon_domain::ContentSnapshot;

/// Error type for fetching raw records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream answered with an error status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// Response status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The upstream reported query errors.
    #[error("query rejected: {0}")]
    Query(String),

    /// The payload could not be decoded.
    #[error("invalid payload: {0}")]
    Decode(String),

    /// A local snapshot could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The source is not configured.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Source of raw section and entry records for one fetch cycle.
pub trait ContentSource: Send + Sync {
    /// Fetches every section and entry record.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream cannot be reached or its answer
    /// cannot be decoded. Callers do not retry.
    fn fetch_snapshot(
        &self,
    ) -> impl std::future::Future<Output = Result<ContentSnapshot, SourceError>> + Send;
}
