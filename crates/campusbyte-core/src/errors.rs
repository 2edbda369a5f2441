//! Application error type and the domain failure taxonomy.
//!
//! Every service returns [`AppError`]. The [`ErrorKind`] is transport-agnostic;
//! it only becomes an HTTP status code when the error is turned into a response.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Category of a failure surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// A uniqueness rule was violated.
    Conflict,
    /// An offering with the same registration, course and section already exists.
    DuplicateOffering,
    /// The operation is not permitted in the current registration status.
    InvalidState,
    /// Two referenced entities do not belong together.
    InvalidRelationship,
    /// The faculty member is not authorized to teach the course.
    NotEligible,
    /// The faculty member already teaches at an overlapping time.
    ScheduleConflict,
    /// Persistence accepted the write but returned no record.
    CreationFailed,
    BadRequest,
    Unprocessable,
    Internal,
}

impl ErrorKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict | Self::DuplicateOffering | Self::ScheduleConflict => {
                StatusCode::CONFLICT
            }
            Self::InvalidState
            | Self::InvalidRelationship
            | Self::NotEligible
            | Self::CreationFailed
            | Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::DuplicateOffering => "duplicate_offering",
            Self::InvalidState => "invalid_state",
            Self::InvalidRelationship => "invalid_relationship",
            Self::NotEligible => "not_eligible",
            Self::ScheduleConflict => "schedule_conflict",
            Self::CreationFailed => "creation_failed",
            Self::BadRequest => "bad_request",
            Self::Unprocessable => "unprocessable",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    pub kind: ErrorKind,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, err)
    }

    pub fn duplicate_offering<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::DuplicateOffering, err)
    }

    pub fn invalid_state<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidState, err)
    }

    pub fn invalid_relationship<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidRelationship, err)
    }

    pub fn not_eligible<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotEligible, err)
    }

    pub fn schedule_conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::ScheduleConflict, err)
    }

    /// Persistence returned no record for `what` (e.g. `"user"`, `"student"`).
    pub fn creation_failed(what: &str) -> Self {
        Self::new(
            ErrorKind::CreationFailed,
            anyhow::anyhow!("Failed to create {}", what),
        )
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Unprocessable, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status_code()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind {
            ErrorKind::Internal => {
                tracing::error!(error = ?self.error, "Request failed with internal error")
            }
            kind => tracing::warn!(kind = %kind, error = %self.error, "Request rejected"),
        }

        let body = ErrorResponse {
            error: self.error.to_string(),
            kind: self.kind,
        };

        (self.status(), Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
