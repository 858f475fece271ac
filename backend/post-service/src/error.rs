/// Error types for Post Service
///
/// This module defines all error types that can occur in the post-service.
/// Errors are converted to appropriate HTTP responses for API clients.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use std::fmt;

/// Result type for post-service operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// A single field-level validation failure, surfaced in 400 bodies.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Application error types
#[derive(Debug)]
pub enum ApiError {
    /// Database operation failed
    Database(String),

    /// Input validation failed, with the offending fields
    Validation(Vec<FieldError>),

    /// Resource not found (includes malformed identifiers)
    NotFound(String),

    /// Missing or invalid credentials
    Unauthorized(String),

    /// Ownership violation
    Forbidden(String),

    /// The caller already liked this post
    AlreadyLiked,

    /// The caller has not liked this post
    NotLiked,

    /// Optimistic concurrency retries exhausted
    Conflict(String),

    /// Internal server error
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(msg) => write!(f, "Database error: {}", msg),
            ApiError::Validation(fields) => {
                let names: Vec<&str> = fields.iter().map(|e| e.field.as_str()).collect();
                write!(f, "Validation error: {}", names.join(", "))
            }
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::AlreadyLiked => write!(f, "User already liked this post"),
            ApiError::NotLiked => write!(f, "Post has not been liked by this user"),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::AlreadyLiked | ApiError::NotLiked => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            // Storage and internal failures stay opaque to the caller;
            // the detail goes to the server log only.
            ApiError::Database(msg) | ApiError::Internal(msg) => {
                tracing::error!("request failed: {}", msg);
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "Internal server error",
                    "status": status.as_u16(),
                }))
            }
            ApiError::Validation(fields) => HttpResponse::build(status).json(serde_json::json!({
                "errors": fields,
            })),
            other => HttpResponse::build(status).json(serde_json::json!({
                "error": other.to_string(),
                "status": status.as_u16(),
            })),
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_classes() {
        assert_eq!(
            ApiError::NotFound("post not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Forbidden("not the author".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::AlreadyLiked.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotLiked.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::Database("connection reset".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn internal_detail_is_not_leaked() {
        let response = ApiError::Database("password=hunter2 in DSN".into()).error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("body read");
        let body = String::from_utf8(bytes.to_vec()).expect("utf8 body");
        assert!(!body.contains("hunter2"));
        assert!(body.contains("Internal server error"));
    }
}
