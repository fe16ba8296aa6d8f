//! Client for the remote authorization provider.
//!
//! Every provider endpoint answers `200` with an `action` discriminator in the
//! body, so a successful status only means the body can be interpreted. The
//! action decoded from that body decides between success, a rejected request
//! and a provider failure.

use crate::config::ProviderConfig;
use crate::errors::AuthError;
use http::StatusCode;
use log::{debug, error};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

pub mod authorization;
pub mod introspection;
pub mod models;

pub(crate) const AUTHORIZATION_PATH: &str = "/api/auth/authorization";
pub(crate) const AUTHORIZATION_ISSUE_PATH: &str = "/api/auth/authorization/issue";
pub(crate) const INTROSPECTION_PATH: &str = "/api/auth/introspection";

/// Errors that can occur when talking to the provider
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to send request to provider: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Provider request failed with status: {0}")]
    InvalidStatus(StatusCode),
    #[error("Failed to parse provider response: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Provider response is missing '{0}'")]
    MissingField(&'static str),
    #[error("Provider rejected the request: {}", .0.as_deref().unwrap_or("no message"))]
    Rejected(Option<String>),
    #[error("Provider failed to process the request: {}", .0.as_deref().unwrap_or("no message"))]
    Failed(Option<String>),
    #[error("Provider did not accept the access token")]
    Unauthorized,
}

impl From<ProviderError> for AuthError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::RequestError(e) => AuthError::internal(e),
            ProviderError::InvalidStatus(_) => AuthError::InternalServerError(None),
            ProviderError::ParseError(e) => AuthError::internal(e),
            ProviderError::MissingField(field) => {
                AuthError::internal(format!("Provider response is missing '{}'", field))
            }
            ProviderError::Rejected(message) => AuthError::BadRequest(message),
            ProviderError::Failed(message) => AuthError::InternalServerError(message),
            ProviderError::Unauthorized => AuthError::Unauthorized,
        }
    }
}

/// Provider API client authenticated with the service credentials
#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    config: ProviderConfig,
}

impl ProviderClient {
    /// Create a new provider client from its configuration
    pub fn new(config: &ProviderConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.client_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// POST a form-encoded body and decode the JSON response
    async fn post_form<F: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        phase: &str,
        path: &str,
        form: &F,
    ) -> Result<R, ProviderError> {
        let request = self.client.post(self.config.url(path)).form(form);
        self.send(phase, request).await
    }

    /// POST a JSON body and decode the JSON response
    async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        phase: &str,
        path: &str,
        body: &B,
    ) -> Result<R, ProviderError> {
        let request = self.client.post(self.config.url(path)).json(body);
        self.send(phase, request).await
    }

    async fn send<R: DeserializeOwned>(
        &self,
        phase: &str,
        request: RequestBuilder,
    ) -> Result<R, ProviderError> {
        let response = request
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await?;

        // Transport status wins over whatever the body claims
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("{} failed with status {}: {}", phase, status, error_text);
            return Err(ProviderError::InvalidStatus(status));
        }

        let body = response.bytes().await?;
        debug!("{} answered with {} bytes", phase, body.len());
        Ok(serde_json::from_slice(&body)?)
    }
}
