//! # HTTP API Errors
//!
//! Maps record outcomes to status codes and the `{"error": "..."}` body.

use axum::extract::rejection::{BytesRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::records::RecordError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body is not a JSON object
    #[error("Invalid JSON body")]
    InvalidBody,

    #[error(transparent)]
    Record(#[from] RecordError),

    /// Request rejected by an extractor before reaching a handler body
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    /// Worker task failed before producing a result
    #[error("Task failed: {0}")]
    Task(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody => StatusCode::BAD_REQUEST,
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
            ApiError::Record(err) => match err {
                RecordError::DatabaseNotFound(_)
                | RecordError::TableNotFound(_)
                | RecordError::RecordNotFound(_) => StatusCode::NOT_FOUND,
                RecordError::Conflict(_) => StatusCode::CONFLICT,
                RecordError::MissingId | RecordError::InvalidName(_) => StatusCode::BAD_REQUEST,
                RecordError::InvalidFormat(_) | RecordError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Message shown to the client. Internal causes are logged, not returned.
    pub fn client_message(&self) -> &str {
        match self {
            ApiError::InvalidBody => "Invalid JSON body",
            ApiError::Task(_) => "Internal server error",
            ApiError::Rejected { message, .. } => message,
            ApiError::Record(err) => match err {
                RecordError::DatabaseNotFound(_) => "Database Not Found",
                RecordError::TableNotFound(_) => "Table Not Found",
                RecordError::RecordNotFound(_) => "Record Not Found",
                RecordError::Conflict(_) => "Record already exists, use PUT or PATCH to update",
                RecordError::MissingId => "Payload does not contain an 'id' field",
                RecordError::InvalidName(_) => "Invalid database or table name",
                RecordError::InvalidFormat(_) => "Invalid data format",
                RecordError::Storage(_) => "Internal server error",
            },
        }
    }
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::Rejected {
                        status: rejection.status(),
                        message: rejection.body_text(),
                    }
                }
            }
        )*
    };
}

impl_from_rejection!(PathRejection, QueryRejection, BytesRejection);

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }

        let body = Json(ErrorResponse {
            error: self.client_message().to_string(),
        });
        (status, body).into_response()
    }
}
