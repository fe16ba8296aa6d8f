use crate::auth::models::AuthorizationCodeEntity;
use crate::errors::ErrorDetails;
use crate::openapi::AUTHORIZATION_CODE_TAG;
use crate::state::AppState;
use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

/// Issuance request body, for OpenAPI documentation only.
/// The handler accepts any JSON and validates it field by field.
#[derive(Debug, Serialize, ToSchema)]
pub struct IssueAuthorizationCodeBody {
    /// Registered client identifier
    pub client_id: u64,
    /// Opaque state, at least 8 characters
    pub state: String,
    /// Absolute redirect URI registered for the client
    pub redirect_uri: String,
    /// UUID of the end user the code is issued for
    pub subject: String,
    /// Requested scopes, `openid` is always included
    pub scopes: Vec<String>,
}

#[utoipa::path(
    post,
    path = "/authorization/code",
    tag = AUTHORIZATION_CODE_TAG,
    request_body = IssueAuthorizationCodeBody,
    responses(
        (status = 201, description = "Authorization code issued", body = AuthorizationCodeEntity),
        (status = 400, description = "Request rejected by the provider", body = ErrorDetails),
        (status = 422, description = "Invalid request payload", body = ErrorDetails),
        (status = 500, description = "Internal server error", body = ErrorDetails)
    )
)]
pub(crate) async fn issue_authorization_code_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Response {
    match state.auth.issue_authorization_code(body).await {
        Ok(entity) => (StatusCode::CREATED, Json(entity)).into_response(),
        Err(err) => {
            log::error!("Failed to issue authorization code: {}", err);
            err.into_response()
        }
    }
}
