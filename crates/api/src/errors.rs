//! Error taxonomy of the request gate.
//!
//! - [`GateRejection`]: failures detected by the gate itself before any
//!   business code runs (validation, authentication, authorization).
//! - [`RequestError`]: a failure raised by business code that carries the HTTP
//!   status it should be answered with.
//! - [`HandlerError`]: what a business function returns on failure; either a
//!   `RequestError` or an unexpected error that is answered with a generic 500.

use axum::http::StatusCode;
use thiserror::Error;

use admissions_core::DomainError;

use crate::envelope::ApiResponse;

pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

/// A failure with an explicit HTTP status, raised from business code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct RequestError {
    message: String,
    status: StatusCode,
}

impl RequestError {
    /// A 400 error; use [`RequestError::with_status`] for anything else.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::BAD_REQUEST,
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message).with_status(StatusCode::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message).with_status(StatusCode::CONFLICT)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message).with_status(StatusCode::UNAUTHORIZED)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message).with_status(StatusCode::FORBIDDEN)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn to_response<T>(&self) -> ApiResponse<T> {
        crate::envelope::fail(self.message.clone()).with_status(self.status)
    }
}

impl From<DomainError> for RequestError {
    fn from(err: DomainError) -> Self {
        let status = match &err {
            DomainError::Validation(_) | DomainError::InvalidId(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
            DomainError::AlreadyExists(_) => StatusCode::CONFLICT,
        };
        Self::new(err.to_string()).with_status(status)
    }
}

/// Failure of a business function.
///
/// Any error converts into this with `?`: `RequestError`s and core
/// `DomainError`s become [`HandlerError::Request`], everything else becomes
/// [`HandlerError::Internal`].
#[derive(Debug)]
pub enum HandlerError {
    Request(RequestError),
    Internal(anyhow::Error),
}

impl<E> From<E> for HandlerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err: anyhow::Error = err.into();
        let err = match err.downcast::<RequestError>() {
            Ok(request) => return Self::Request(request),
            Err(other) => other,
        };
        match err.downcast::<DomainError>() {
            Ok(domain) => Self::Request(domain.into()),
            Err(other) => Self::Internal(other),
        }
    }
}

impl core::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Request(err) => write!(f, "{} ({})", err, err.status()),
            Self::Internal(err) => write!(f, "internal: {err:#}"),
        }
    }
}

/// Result type of business functions.
pub type HandlerResult<T> = Result<ApiResponse<T>, HandlerError>;

/// Requests the gate turns away before invoking business code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateRejection {
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Unable to read request body")]
    UnreadableBody,

    #[error("Authentication required")]
    MissingCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Insufficient permissions")]
    Forbidden,
}

impl GateRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationFailed(_) | Self::UnreadableBody => StatusCode::BAD_REQUEST,
            Self::MissingCredentials | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
        }
    }

    pub fn to_response<T>(&self) -> ApiResponse<T> {
        crate::envelope::fail(self.to_string()).with_status(self.status())
    }
}
