use crate::api;
use utoipa::OpenApi;

pub(crate) const HEALTH_TAG: &str = "Health API";
pub(crate) const AUTHORIZER_TAG: &str = "Authorizer API";
pub(crate) const AUTHORIZATION_CODE_TAG: &str = "Authorization Code API";

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::authorizer::authorizer_handler,
        api::authorization_code::issue_authorization_code_handler,
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = AUTHORIZER_TAG, description = "Capability decisions for bearer credentials"),
        (name = AUTHORIZATION_CODE_TAG, description = "OAuth 2.0 authorization code issuance"),
    ),
    info(
        title = "Authorization Gateway API",
        description = "Authorization decisions and authorization code issuance",
        version = "0.1.0"
    )
)]
pub(crate) struct ApiDoc;
