use crate::auth::models::AuthorizerEvent;
use crate::auth::policy::CapabilityDecision;
use crate::errors::{AuthError, ErrorDetails};
use crate::openapi::AUTHORIZER_TAG;
use crate::state::AppState;
use axum::{
    extract::{Json, State},
    response::{IntoResponse, Response},
};
use http::StatusCode;

#[utoipa::path(
    post,
    path = "/authorizer",
    tag = AUTHORIZER_TAG,
    request_body = AuthorizerEvent,
    responses(
        (status = 200, description = "Capability decision for the requested resource", body = CapabilityDecision),
        (status = 401, description = "Missing or invalid bearer credential", body = ErrorDetails),
        (status = 500, description = "Internal server error", body = ErrorDetails)
    )
)]
pub(crate) async fn authorizer_handler(
    State(state): State<AppState>,
    Json(event): Json<AuthorizerEvent>,
) -> Response {
    match state.auth.authorize(&event).await {
        Ok(decision) => (StatusCode::OK, Json(decision)).into_response(),
        Err(err @ AuthError::Unauthorized) => {
            log::warn!("Rejected unauthorized request for: {}", event.method_arn);
            err.into_response()
        }
        Err(err) => {
            log::error!("Failed to authorize request: {}", err);
            err.into_response()
        }
    }
}
