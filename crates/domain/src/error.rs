//! Domain error types

use thiserror::Error;

/// Domain-level errors that stop the build or generation pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An upstream record is missing a required field.
    #[error("malformed record {id}: {reason}")]
    MalformedRecord {
        /// Upstream id of the record, or its position when the id is missing.
        id: String,
        /// What is wrong with the record.
        reason: String,
    },

    /// A sanitized key cannot be used as an identifier in the target dialect.
    #[error("reserved identifier `{identifier}` from key {key:?} in {dialect}; rename the entry upstream")]
    ReservedIdentifier {
        /// Upstream key that produced the identifier.
        key: String,
        /// The offending sanitized identifier.
        identifier: String,
        /// Display name of the target dialect.
        dialect: String,
    },
}

impl DomainError {
    /// Creates a malformed record error.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
