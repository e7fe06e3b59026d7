//! Service-level errors and their HTTP mapping.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::{
    dao::bracket::RemoteError, services::report_service::ReportError, state::queue::QueueError,
};

/// Errors that can occur in session and service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The remote bracket failed or refused the call.
    #[error(transparent)]
    Remote(#[from] RemoteError),
    /// Lookup miss in the local queue or participant directory.
    #[error(transparent)]
    Queue(#[from] QueueError),
    /// Report refused before reaching the remote bracket.
    #[error(transparent)]
    Report(#[from] ReportError),
}

impl ServiceError {
    /// Whether local state is guaranteed untouched and the command may be reissued as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Remote(_))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with the remote bracket's state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Remote bracket unreachable.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Remote(RemoteError::Transport { message, .. }) => {
                AppError::ServiceUnavailable(message)
            }
            ServiceError::Remote(RemoteError::Rejected { message }) => AppError::Conflict(message),
            ServiceError::Queue(QueueError::UnknownMatch(identifier)) => {
                AppError::NotFound(format!("match {identifier}"))
            }
            ServiceError::Queue(err @ QueueError::UnknownParticipant { .. }) => {
                AppError::Internal(err.to_string())
            }
            ServiceError::Report(err) => AppError::BadRequest(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
