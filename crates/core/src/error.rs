//! Failures shared by every record kind.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// A deterministic failure of a domain operation.
///
/// Messages are written for end users; the API crate maps each variant onto
/// an HTTP status and sends the message as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),

    /// A path or body identifier did not parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Names the record kind, e.g. `NotFound("university")`.
    #[error("{0} not found")]
    NotFound(String),

    /// A uniqueness rule rejected the write (id, name or email taken).
    #[error("{0} already exists")]
    AlreadyExists(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn not_found(kind: impl Into<String>) -> Self {
        Self::NotFound(kind.into())
    }

    pub fn already_exists(kind: impl Into<String>) -> Self {
        Self::AlreadyExists(kind.into())
    }
}
