use crate::auth::service::AuthService;
use crate::config::GatewayConfig;
use crate::provider::ProviderClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Build the state, injecting the provider credentials from the configuration
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let provider = ProviderClient::new(&config.provider)?;
        Ok(Self {
            auth: Arc::new(AuthService::new(config.principal_id.clone(), provider)),
        })
    }

    #[cfg(test)]
    pub fn for_testing(config: &GatewayConfig) -> Self {
        Self::new(config).expect("Failed to create test state")
    }
}
