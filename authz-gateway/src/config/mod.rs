pub(crate) use crate::config::provider::ProviderConfig;
use confique::Config;

pub mod provider;

/// Optional configuration file, read after the environment
const CONFIG_FILE: &str = "authz-gateway.toml";

/// Main configuration structure for the gateway server
#[derive(Debug, Config, Clone)]
pub struct GatewayConfig {
    /// The port the gateway server will listen to (default: 7766)
    #[config(env = "AUTHZ_PORT", default = 7766)]
    pub port: u16,

    /// Principal reported in authorizer decisions (default: user)
    #[config(env = "AUTHZ_PRINCIPAL_ID", default = "user")]
    pub principal_id: String,

    /// Remote authorization provider configuration
    #[config(nested)]
    pub provider: ProviderConfig,
}

impl GatewayConfig {
    /// Creates a new Config instance from environment variables and the optional config file
    pub fn new() -> Result<Self, String> {
        Self::builder()
            .env()
            .file(CONFIG_FILE)
            .load()
            .map_err(|e| e.to_string())
    }

    #[cfg(test)]
    pub fn for_test_with_mock(provider_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            principal_id: "user".to_string(),
            provider: ProviderConfig {
                api_url: provider_mock.uri(),
                api_key: "test_api_key".to_string(),
                api_secret: "test_api_secret".to_string(),
                client_timeout: 5,
                connect_timeout: 1,
            },
        }
    }
}
