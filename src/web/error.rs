//! API error handling for the imgshelf web API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

use crate::ShelfError;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Not found (404).
    NotFound,
    /// Conflict (409).
    Conflict,
    /// Payload too large (413).
    PayloadTooLarge,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Extra detail (validation fields or the underlying error).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach details to this error.
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Error code of this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Message of this error.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Create a bad request error from validator::ValidationErrors.
    ///
    /// The first field message becomes the error message; every field's
    /// messages are listed in `details`.
    pub fn from_validation_errors(errors: validator::ValidationErrors) -> Self {
        let mut details: HashMap<String, Vec<String>> = HashMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<String> = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field))
                })
                .collect();
            details.insert(field.to_string(), messages);
        }

        let mut fields: Vec<&String> = details.keys().collect();
        fields.sort();
        let message = fields
            .first()
            .and_then(|f| details.get(*f))
            .and_then(|m| m.first())
            .cloned()
            .unwrap_or_else(|| "Validation failed".to_string());

        let details = serde_json::to_value(&details).unwrap_or(Value::Null);
        Self::bad_request(message).with_details(details)
    }

    /// Convert a storage error, using `context` as the message for internal errors.
    ///
    /// The underlying error is logged but not returned to the client.
    pub fn from_shelf(err: ShelfError, context: &str) -> Self {
        match err {
            ShelfError::InvalidInput(_)
            | ShelfError::InvalidPath(_)
            | ShelfError::NotADirectory(_)
            | ShelfError::CannotDeleteRoot => ApiError::bad_request(err.to_string()),
            ShelfError::NotFound(_) => ApiError::not_found(err.to_string()),
            ShelfError::AlreadyExists(_) => ApiError::conflict(err.to_string()),
            ShelfError::Io(_) | ShelfError::Config(_) => {
                tracing::error!("{}: {}", context, err);
                ApiError::internal(context)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ShelfError> for ApiError {
    fn from(err: ShelfError) -> Self {
        ApiError::from_shelf(err, "An internal error occurred")
    }
}
