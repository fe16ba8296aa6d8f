use crate::auth::models::ValidationErrorMap;
use axum::response::IntoResponse;
use axum::Json;
use http::StatusCode;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use thiserror::Error;
use utoipa::ToSchema;

/// Every failure the gateway reports to its callers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No credential, or a credential the provider does not accept
    #[error("Unauthorized")]
    Unauthorized,
    /// Caller-supplied data rejected by the provider, message forwarded verbatim
    #[error("Bad Request: {}", .0.as_deref().unwrap_or("no detail"))]
    BadRequest(Option<String>),
    /// Caller-supplied data rejected by field-level validation
    #[error("Unprocessable Entity: {} invalid field(s)", .0.len())]
    Validation(ValidationErrorMap),
    /// Transport failure, unexpected status or an uninterpretable provider response
    #[error("Internal Server Error: {}", .0.as_deref().unwrap_or("no detail"))]
    InternalServerError(Option<String>),
}

impl AuthError {
    /// Create a Bad Request error (400) with a detail message
    pub fn bad_request<S: ToString>(detail: S) -> Self {
        Self::BadRequest(Some(detail.to_string()))
    }

    /// Create an Internal Server Error (500) with a detail message
    pub fn internal<S: ToString>(detail: S) -> Self {
        Self::InternalServerError(Some(detail.to_string()))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The detail message carried by the error, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::BadRequest(message) | Self::InternalServerError(message) => message.as_deref(),
            Self::Unauthorized | Self::Validation(_) => None,
        }
    }
}

/// Error body for OpenAPI documentation only, responses are built in `into_response`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetails {
    /// HTTP status code
    pub code: u16,
    /// Provider message or the status reason
    pub message: String,
    /// Per-field validation errors (422 only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        let message = self
            .message()
            .map(str::to_string)
            .or_else(|| status_code.canonical_reason().map(str::to_string))
            .unwrap_or_default();

        let mut body = json!({
            "code": status_code.as_u16(),
            "message": message,
        });
        if let Self::Validation(errors) = &self {
            body["errors"] = json!(errors);
        }
        (status_code, Json(body)).into_response()
    }
}
