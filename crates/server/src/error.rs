//! Unified error handling for the JSON API.
//!
//! Provides a unified `AppError` type that maps every failure onto the
//! `{success:false, message, error?}` envelope the frontend consumes. All
//! route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed validation; the message is returned verbatim.
    #[error("bad request: {0}")]
    Validation(String),

    /// Email/password pair did not match a stored user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No user row for the requested id.
    #[error("user not found")]
    UserNotFound,

    /// Store or filesystem failure, reported with a per-operation message.
    /// `detail` is always logged; it is included in the response body only
    /// when `expose` is set (the list/export and register endpoints do).
    #[error("{message}")]
    Operation {
        message: &'static str,
        detail: String,
        expose: bool,
    },
}

impl AppError {
    /// A 500 whose source detail is included in the response `error` field.
    pub fn operation(message: &'static str, source: &impl std::error::Error) -> Self {
        Self::Operation {
            message,
            detail: source.to_string(),
            expose: true,
        }
    }

    /// A 500 whose source detail is logged but not exposed to the client.
    pub fn operation_opaque(message: &'static str, source: &impl std::error::Error) -> Self {
        Self::Operation {
            message,
            detail: source.to_string(),
            expose: false,
        }
    }
}

/// JSON error envelope: `{success:false, message, error?}`.
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    success: bool,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match &self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message.as_str(), None),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials", None),
            Self::UserNotFound => (StatusCode::NOT_FOUND, "User not found.", None),
            Self::Operation {
                message,
                detail,
                expose,
            } => {
                tracing::error!(error = %detail, "{message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    *message,
                    expose.then_some(detail.as_str()),
                )
            }
        };

        let body = ErrorBody {
            success: false,
            message,
            error,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("Missing required fields".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(status_of(AppError::UserNotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(AppError::Operation {
                message: "Failed to add product",
                detail: "boom".into(),
                expose: false,
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_omits_error_when_not_exposed() {
        let body = ErrorBody {
            success: false,
            message: "Failed to add product",
            error: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Failed to add product");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_envelope_includes_error_when_exposed() {
        let body = ErrorBody {
            success: false,
            message: "Failed to fetch products",
            error: Some("database error: boom"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["error"], "database error: boom");
    }
}
