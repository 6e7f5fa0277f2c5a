//! Error envelope for the Bookswap HTTP layer

use std::future::Future;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

const INTERNAL_MESSAGE: &str = "An internal server error occurred";

tokio::task_local! {
    static REQUEST_ID: Uuid;
}

/// Run `fut` with `request_id` as the trace id of any error it returns.
pub async fn scope_request_id<F: Future>(request_id: Uuid, fut: F) -> F::Output {
    REQUEST_ID.scope(request_id, fut).await
}

/// Request id of the current request, or a fresh UUIDv7 outside one.
fn current_trace_id() -> Uuid {
    REQUEST_ID
        .try_with(|id| *id)
        .unwrap_or_else(|_| Uuid::now_v7())
}

/// Body of every error response, wrapped as `{"error": ErrorBody}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    #[error("validation error: {message}")]
    Validation {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },

    #[error("conflict: {message}")]
    Conflict { message: String, code: String },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error("unauthorized: {message}")]
    Unauthorized { message: String, code: String },

    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a validation error with the generic code
    pub fn validation(details: Vec<serde_json::Value>, message: impl Into<String>) -> Self {
        Self::validation_with_code("validation_error", details, message)
    }

    /// Create a validation error with a specific code
    pub fn validation_with_code(
        code: impl Into<String>,
        details: Vec<serde_json::Value>,
        message: impl Into<String>,
    ) -> Self {
        Self::Validation {
            details,
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            code: "conflict".to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            code: "unauthorized".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Envelope body for this error. Internal causes never reach the client.
    pub fn body(self, trace_id: Uuid) -> ErrorBody {
        let timestamp = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();

        let (code, message, details) = match self {
            AppError::Validation {
                details,
                code,
                message,
            } => (code, message, details),
            AppError::Conflict { message, code }
            | AppError::NotFound { message, code }
            | AppError::Unauthorized { message, code }
            | AppError::BadRequest { message, code } => (code, message, Vec::new()),
            AppError::Internal(_) => (
                "internal_error".to_string(),
                INTERNAL_MESSAGE.to_string(),
                Vec::new(),
            ),
        };

        ErrorBody {
            code,
            message,
            details,
            trace_id: trace_id.to_string(),
            timestamp,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let trace_id = current_trace_id();
        let status = self.status();

        if let AppError::Internal(err) = &self {
            tracing::error!(
                trace_id = %trace_id,
                status_code = status.as_u16(),
                error = %format!("{err:#}"),
                "request failed"
            );
        } else {
            tracing::info!(
                trace_id = %trace_id,
                status_code = status.as_u16(),
                error = %self,
                "request rejected"
            );
        }

        let envelope = ErrorEnvelope {
            error: self.body(trace_id),
        };
        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error() {
        let details = vec![serde_json::json!({"field": "bookId", "error": "required"})];
        let error = AppError::validation(details.clone(), "Validation failed");

        match error {
            AppError::Validation {
                details: d,
                code,
                message,
            } => {
                assert_eq!(d, details);
                assert_eq!(code, "validation_error");
                assert_eq!(message, "Validation failed");
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn test_error_response_mapping() {
        assert_eq!(
            AppError::not_found("missing").into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("taken").into_response().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::unauthorized("who").into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn test_error_response_format() {
        let response = AppError::validation_with_code(
            "missing_info",
            vec![],
            "Missing user or book owner info.",
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "missing_info");
        assert_eq!(body["error"]["message"], "Missing user or book owner info.");
        assert!(body["error"]["details"].as_array().unwrap().is_empty());
        assert!(Uuid::parse_str(body["error"]["trace_id"].as_str().unwrap()).is_ok());
        assert!(OffsetDateTime::parse(body["error"]["timestamp"].as_str().unwrap(), &Rfc3339).is_ok());
    }

    #[tokio::test]
    async fn trace_id_follows_the_request_id() {
        let request_id = Uuid::now_v7();
        let response =
            scope_request_id(request_id, async { AppError::not_found("book").into_response() })
                .await;

        let body = body_json(response).await;
        assert_eq!(body["error"]["trace_id"], request_id.to_string());
    }

    #[tokio::test]
    async fn test_internal_error_is_generic() {
        let error = AppError::Internal(anyhow::anyhow!("document store unreachable"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "internal_error");
        assert_eq!(body["error"]["message"], INTERNAL_MESSAGE);
    }
}
