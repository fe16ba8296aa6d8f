//! Provider response envelopes, decoded as closed sets of actions

use crate::auth::models::{AccessTokenEntity, AuthorizationCodeEntity, AuthorizationTicket};
use crate::provider::ProviderError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Action of the authorization (ticket) endpoint
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationAction {
    Interaction,
    BadRequest,
    InternalServerError,
    #[serde(other)]
    Unrecognized,
}

/// Action of the authorization issue endpoint
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueAction {
    Location,
    BadRequest,
    InternalServerError,
    #[serde(other)]
    Unrecognized,
}

/// Action of the introspection endpoint
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntrospectionAction {
    Ok,
    BadRequest,
    Unauthorized,
    Forbidden,
    InternalServerError,
    #[serde(other)]
    Unrecognized,
}

/// Response of the authorization (ticket) endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationResponse {
    pub action: AuthorizationAction,
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(default)]
    pub result_message: Option<String>,
}

impl AuthorizationResponse {
    pub fn into_ticket(self) -> Result<AuthorizationTicket, ProviderError> {
        match self.action {
            AuthorizationAction::Interaction => self
                .ticket
                .filter(|ticket| !ticket.is_empty())
                .map(AuthorizationTicket::new)
                .ok_or(ProviderError::MissingField("ticket")),
            AuthorizationAction::BadRequest => Err(ProviderError::Rejected(self.result_message)),
            AuthorizationAction::InternalServerError | AuthorizationAction::Unrecognized => {
                Err(ProviderError::Failed(self.result_message))
            }
        }
    }
}

/// Request body of the authorization issue endpoint
#[derive(Debug, Serialize)]
pub struct AuthorizationIssueRequest<'a> {
    pub ticket: &'a str,
    pub subject: &'a str,
}

/// Response of the authorization issue endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizationIssueResponse {
    pub action: IssueAction,
    #[serde(default)]
    pub authorization_code: Option<String>,
    /// Redirect location carrying `code` and `state`
    #[serde(default)]
    pub response_content: Option<String>,
    #[serde(default)]
    pub result_message: Option<String>,
}

impl AuthorizationIssueResponse {
    /// Convert a `LOCATION` response to the issued code.
    ///
    /// The entity always carries the state of the originating request. A
    /// different state echoed in the redirect location fails the issuance.
    pub fn into_entity(
        self,
        requested_state: &str,
    ) -> Result<AuthorizationCodeEntity, ProviderError> {
        match self.action {
            IssueAction::Location => {
                let location = self
                    .response_content
                    .as_deref()
                    .and_then(|content| Url::parse(content).ok());
                let query_value = |name: &str| {
                    location.as_ref().and_then(|url| {
                        url.query_pairs()
                            .find(|(key, _)| key == name)
                            .map(|(_, value)| value.into_owned())
                    })
                };

                let code = self
                    .authorization_code
                    .filter(|code| !code.is_empty())
                    .or_else(|| query_value("code"))
                    .ok_or(ProviderError::MissingField("authorizationCode"))?;
                let echoed_state = query_value("state");
                if let Some(echoed) = echoed_state.filter(|echoed| echoed != requested_state) {
                    return Err(ProviderError::Failed(Some(format!(
                        "Provider echoed state '{}' for request state '{}'",
                        echoed, requested_state
                    ))));
                }

                Ok(AuthorizationCodeEntity::new(code, requested_state.to_string()))
            }
            IssueAction::BadRequest => Err(ProviderError::Rejected(self.result_message)),
            IssueAction::InternalServerError | IssueAction::Unrecognized => {
                Err(ProviderError::Failed(self.result_message))
            }
        }
    }
}

/// Request body of the introspection endpoint
#[derive(Debug, Serialize)]
pub struct IntrospectionRequest<'a> {
    pub token: &'a str,
}

/// Response of the introspection endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionResponse {
    pub action: IntrospectionAction,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub client_id: Option<u64>,
    #[serde(default)]
    pub scopes: Option<Vec<String>>,
    #[serde(default)]
    pub expires_at: Option<u64>,
    #[serde(default)]
    pub result_message: Option<String>,
}

impl IntrospectionResponse {
    pub fn into_entity(self, token: &str) -> Result<AccessTokenEntity, ProviderError> {
        match self.action {
            IntrospectionAction::Ok => Ok(AccessTokenEntity {
                token: token.to_string(),
                subject: self.subject,
                client_id: self.client_id,
                scopes: self.scopes.unwrap_or_default(),
                expires_at: self.expires_at,
            }),
            IntrospectionAction::Unauthorized | IntrospectionAction::Forbidden => {
                Err(ProviderError::Unauthorized)
            }
            IntrospectionAction::BadRequest => Err(ProviderError::Rejected(self.result_message)),
            IntrospectionAction::InternalServerError | IntrospectionAction::Unrecognized => {
                Err(ProviderError::Failed(self.result_message))
            }
        }
    }
}
