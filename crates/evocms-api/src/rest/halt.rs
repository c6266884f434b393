//! Error envelope of the REST API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use evocms_core::error::AppError;

use crate::error::status_of;

/// Stops a REST request with `{code, message, data: {status}}`.
///
/// Some halts are informational and still carry status 200, e.g.
/// `no_posts` or `no_access`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiHalt {
    /// HTTP status, repeated in `data.status`.
    pub status: StatusCode,
    /// Machine-readable code.
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl ApiHalt {
    /// A halt with an explicit status.
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    /// 404 `wrong_route`.
    pub fn wrong_route(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "wrong_route", message)
    }

    /// 404 with the given code.
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    /// 400 `invalid_query`: the query string could not be read.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_query", message)
    }

    /// 403 with the given code.
    pub fn forbidden(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, code, message)
    }

    /// 200 with the given code; the request was fine but there is nothing
    /// to show.
    pub fn empty(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, code, message)
    }

    /// JSON body of the envelope.
    pub fn body(&self) -> serde_json::Value {
        json!({
            "code": self.code,
            "message": self.message,
            "data": { "status": self.status.as_u16() },
        })
    }
}

impl From<AppError> for ApiHalt {
    fn from(err: AppError) -> Self {
        let (status, _) = status_of(err.kind);
        if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, "REST request failed");
            Self::new(status, "server_error", "Internal server error")
        } else {
            Self::new(status, "request_failed", err.message)
        }
    }
}

impl IntoResponse for ApiHalt {
    fn into_response(self) -> Response {
        (self.status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let halt = ApiHalt::not_found("unknown_module", "Unknown module \"foo\"");
        assert_eq!(
            halt.body(),
            json!({
                "code": "unknown_module",
                "message": "Unknown module \"foo\"",
                "data": {"status": 404}
            })
        );
    }

    #[test]
    fn test_empty_halt_is_ok() {
        let response = ApiHalt::empty("no_posts", "No posts found for requested collection").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_database_error_hides_detail() {
        let halt = ApiHalt::from(AppError::database("password authentication failed"));
        assert_eq!(halt.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(halt.message, "Internal server error");
    }
}
