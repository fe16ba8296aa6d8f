use crate::auth::credential::extract_access_token;
use crate::auth::models::{
    AccessTokenEntity, AuthorizationCodeEntity, AuthorizationCodeRequest, AuthorizerEvent,
};
use crate::auth::policy::{build_policy, CapabilityDecision, CredentialClassifier, MarkerClassifier};
use crate::auth::validation::validate_issue_authorization_code;
use crate::errors::AuthError;
use crate::provider::ProviderClient;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;

/// Looks up an access token, failing when it is not known or not usable
#[async_trait]
pub trait AccessTokenRepository: Send + Sync {
    async fn fetch(&self, token: &str) -> Result<AccessTokenEntity, AuthError>;
}

/// Entry point of the authorize and issuance workflows
#[derive(Clone)]
pub struct AuthService {
    principal_id: String,
    provider: ProviderClient,
    tokens: Arc<dyn AccessTokenRepository>,
    classifier: Arc<dyn CredentialClassifier>,
}

impl AuthService {
    /// Create a service that looks tokens up through the provider and
    /// classifies credentials by marker
    pub fn new<S: Into<String>>(principal_id: S, provider: ProviderClient) -> Self {
        Self {
            principal_id: principal_id.into(),
            tokens: Arc::new(provider.clone()),
            provider,
            classifier: Arc::new(MarkerClassifier),
        }
    }

    pub fn with_token_repository(mut self, tokens: Arc<dyn AccessTokenRepository>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn CredentialClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Decide whether the bearer of the event's credential may invoke its resource
    pub async fn authorize(&self, event: &AuthorizerEvent) -> Result<CapabilityDecision, AuthError> {
        let access_token = extract_access_token(event.authorization_token.as_deref());
        if access_token.is_empty() {
            warn!("Missing or malformed bearer credential");
            return Err(AuthError::Unauthorized);
        }

        let effect = self.classifier.classify(&access_token)?;
        self.tokens.fetch(&access_token).await?;

        debug!("Decided {:?} for resource: {}", effect, event.method_arn);
        Ok(build_policy(
            &self.principal_id,
            Some(effect),
            Some(&event.method_arn),
        ))
    }

    /// Validate a loosely typed issuance request and run the two-phase exchange
    pub async fn issue_authorization_code(
        &self,
        input: Value,
    ) -> Result<AuthorizationCodeEntity, AuthError> {
        let errors = validate_issue_authorization_code(&input);
        if !errors.is_empty() {
            warn!("Authorization code request rejected: {:?}", errors);
            return Err(AuthError::Validation(errors));
        }

        let request: AuthorizationCodeRequest =
            serde_json::from_value(input).map_err(AuthError::internal)?;
        let entity = self.provider.issue_authorization_code(&request).await?;

        info!(
            "Issued authorization code to client_id: {}",
            request.client_id
        );
        Ok(entity)
    }
}
