use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;
use utoipa::ToSchema;

/// Scope every authorization-code request carries, always first
pub const OPENID_SCOPE: &str = "openid";

/// Field path (e.g. `scopes[1]`) to error message. Empty means valid.
pub type ValidationErrorMap = BTreeMap<String, String>;

/// Inbound authorizer event
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerEvent {
    /// Raw Authorization header value
    #[serde(default)]
    pub authorization_token: Option<String>,
    /// Resource the caller wants to invoke
    pub method_arn: String,
}

/// A validated request to issue an authorization code
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuthorizationCodeRequest {
    pub client_id: u64,
    pub state: String,
    pub redirect_uri: Url,
    pub subject: String,
    pub scopes: Vec<String>,
}

impl AuthorizationCodeRequest {
    /// Requested scopes with `openid` first and every other scope once, in request order
    pub fn effective_scopes(&self) -> Vec<&str> {
        let mut scopes = vec![OPENID_SCOPE];
        for scope in &self.scopes {
            if !scopes.contains(&scope.as_str()) {
                scopes.push(scope.as_str());
            }
        }
        scopes
    }
}

/// Opaque ticket returned by the provider's first phase, redeemable once
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationTicket(String);

impl AuthorizationTicket {
    pub fn new<S: Into<String>>(ticket: S) -> Self {
        Self(ticket.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issued authorization code returned to the caller
#[derive(Debug, Serialize, ToSchema, Clone, PartialEq, Eq)]
pub struct AuthorizationCodeEntity {
    /// The authorization code
    code: String,
    /// State echoed back from the authorization request
    state: String,
}

impl AuthorizationCodeEntity {
    pub fn new(code: String, state: String) -> Self {
        Self { code, state }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

/// Access token as known by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessTokenEntity {
    pub token: String,
    pub subject: Option<String>,
    pub client_id: Option<u64>,
    pub scopes: Vec<String>,
    /// Expiration as Unix time in milliseconds
    pub expires_at: Option<u64>,
}
