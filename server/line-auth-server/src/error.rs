use crate::services::LoginError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use error_common::{codes, sanitize_message};
use logger_redacted::redact;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Human-readable error message
    #[schema(example = "Missing authorization code")]
    pub error: String,
}

/// Errors surfaced at the HTTP boundary
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Login(#[from] LoginError),

    /// Body was not JSON or did not have the expected shape
    #[error("{message}")]
    MalformedBody { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Login(err) => err.status_code(),
            ApiError::MalformedBody { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Login(err) => err.code(),
            ApiError::MalformedBody { .. } => codes::internal::UNREADABLE_BODY,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedBody {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4().to_string();
        let status_code = self.status_code();
        let message = sanitize_message(&self.to_string(), "Internal server error");

        if status_code.is_server_error() {
            error!(
                error_id = %error_id,
                code = self.code(),
                status_code = status_code.as_u16(),
                error = %redact(&message),
                "Login request failed"
            );
        } else {
            warn!(
                error_id = %error_id,
                code = self.code(),
                status_code = status_code.as_u16(),
                error = %redact(&message),
                "Login request rejected"
            );
        }

        (status_code, Json(ApiErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, ApiErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn bad_requests_carry_the_message() {
        let (status, body) =
            body_of(LoginError::ProviderRejected("invalid authorization code".to_string()).into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "invalid authorization code");
    }

    #[tokio::test]
    async fn internal_errors_are_500_with_message() {
        let err = LoginError::Internal {
            code: codes::provider::UPSTREAM_FAILURE,
            message: "Profile endpoint returned HTTP 401: invalid token".to_string(),
        };
        let (status, body) = body_of(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Profile endpoint returned HTTP 401: invalid token");
    }

    #[tokio::test]
    async fn blank_internal_message_gets_fallback() {
        let err = LoginError::Internal {
            code: codes::internal::UNEXPECTED,
            message: String::new(),
        };
        let (_, body) = body_of(err.into()).await;

        assert_eq!(body.error, "Internal server error");
    }

    #[tokio::test]
    async fn unparseable_body_is_an_internal_error() {
        let parse_error = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let expected = parse_error.to_string();
        let err = ApiError::from(parse_error);

        assert_eq!(err.code(), codes::internal::UNREADABLE_BODY);
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, expected);
    }
}
