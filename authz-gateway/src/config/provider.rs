use confique::Config;
use std::time::Duration;

/// Configuration for the remote authorization provider
#[derive(Debug, Config, Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider API (default: https://api.authlete.com)
    #[config(env = "AUTHZ_PROVIDER_API_URL", default = "https://api.authlete.com")]
    pub api_url: String,

    /// Service API key, sent as the Basic auth username
    #[config(env = "AUTHZ_PROVIDER_API_KEY")]
    pub api_key: String,

    /// Service API secret, sent as the Basic auth password
    #[config(env = "AUTHZ_PROVIDER_API_SECRET")]
    pub api_secret: String,

    /// Timeout for a single provider request in seconds (default: 10)
    #[config(env = "AUTHZ_PROVIDER_CLIENT_TIMEOUT", default = 10)]
    pub client_timeout: u64,

    /// Timeout for establishing a provider connection in seconds (default: 2)
    #[config(env = "AUTHZ_PROVIDER_CONNECT_TIMEOUT", default = 2)]
    pub connect_timeout: u64,
}

impl ProviderConfig {
    /// Returns the absolute provider URL for the given API path
    pub fn url<S: AsRef<str>>(&self, path: S) -> String {
        let base = self.api_url.trim_end_matches('/');
        let path = path.as_ref();
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }

    pub fn client_timeout(&self) -> Duration {
        Duration::from_secs(self.client_timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout)
    }
}
