pub(crate) mod authorization_code;
pub(crate) mod authorizer;
pub(crate) mod health;

use crate::state::AppState;
use axum::{routing::post, Router};

/// Combines all API routes into a single router
pub(super) fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .route("/authorizer", post(authorizer::authorizer_handler))
        .route(
            "/authorization/code",
            post(authorization_code::issue_authorization_code_handler),
        )
}
