//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

use coinbase_auth::{DEFAULT_API_VERSION, ENV_ACCESS_TOKEN, ENV_API_KEY_NAME, ENV_API_PRIVATE_KEY};

use crate::error::{RestError, RestResult};

/// Default API root
pub const DEFAULT_BASE_URI: &str = "https://api.coinbase.com/v2/";
/// Default OAuth token endpoint
pub const DEFAULT_TOKEN_URI: &str = "https://api.coinbase.com/oauth/token";
/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

const ENV_REFRESH_TOKEN: &str = "COINBASE_REFRESH_TOKEN";
const ENV_BASE_URI: &str = "COINBASE_BASE_URI";
const ENV_API_VERSION: &str = "COINBASE_API_VERSION";
const ENV_TIMEOUT_MS: &str = "COINBASE_TIMEOUT_MS";

/// Default user agent
pub fn default_user_agent() -> String {
    format!("coinbase-rs/{}", env!("CARGO_PKG_VERSION"))
}

/// Client configuration
///
/// Exactly one of `access_token` or (`api_key_name` and `api_private_key`)
/// must be set; this is checked when the client is built.
#[derive(Clone)]
pub struct ClientConfig {
    /// API root every request path is joined onto (trailing `/`)
    pub base_api_uri: String,
    /// OAuth token endpoint
    pub token_uri: String,
    /// Extra trusted CA certificate (PEM file)
    pub ca_file: Option<PathBuf>,
    /// Validate TLS certificates
    pub strict_ssl: bool,
    /// Per-request timeout
    pub timeout: Duration,
    /// OAuth access token (token mode)
    pub access_token: Option<String>,
    /// OAuth refresh token
    pub refresh_token: Option<String>,
    /// CDP API key name (key-pair mode)
    pub api_key_name: Option<String>,
    /// CDP API private key PEM (key-pair mode)
    pub api_private_key: Option<String>,
    /// `CB-VERSION` header value
    pub version: String,
    /// User agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_api_uri: DEFAULT_BASE_URI.to_string(),
            token_uri: DEFAULT_TOKEN_URI.to_string(),
            ca_file: None,
            strict_ssl: true,
            timeout: DEFAULT_TIMEOUT,
            access_token: None,
            refresh_token: None,
            api_key_name: None,
            api_private_key: None,
            version: DEFAULT_API_VERSION.to_string(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for an API key pair
    pub fn with_api_key(key_name: impl Into<String>, private_key: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api_key_name = Some(key_name.into());
        config.api_private_key = Some(private_key.into());
        config
    }

    /// Configuration for an OAuth access token
    pub fn with_access_token(access_token: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.access_token = Some(access_token.into());
        config
    }

    /// Load configuration from environment variables
    ///
    /// Credentials come from `COINBASE_ACCESS_TOKEN`, `COINBASE_API_KEY_NAME`
    /// and `COINBASE_API_PRIVATE_KEY`. `COINBASE_REFRESH_TOKEN`,
    /// `COINBASE_BASE_URI`, `COINBASE_API_VERSION` and `COINBASE_TIMEOUT_MS`
    /// override the defaults when set.
    pub fn from_env() -> RestResult<Self> {
        let mut config = Self::default();

        config.access_token = std::env::var(ENV_ACCESS_TOKEN).ok();
        config.api_key_name = std::env::var(ENV_API_KEY_NAME).ok();
        config.api_private_key = std::env::var(ENV_API_PRIVATE_KEY).ok();
        config.refresh_token = std::env::var(ENV_REFRESH_TOKEN).ok();

        if let Ok(base_uri) = std::env::var(ENV_BASE_URI) {
            config = config.with_base_uri(base_uri);
        }
        if let Ok(version) = std::env::var(ENV_API_VERSION) {
            config.version = version;
        }
        if let Ok(timeout) = std::env::var(ENV_TIMEOUT_MS) {
            let millis = timeout.parse::<u64>().map_err(|_| {
                RestError::Configuration(format!("{} must be milliseconds, got {:?}", ENV_TIMEOUT_MS, timeout))
            })?;
            config.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    /// Set the API root (a trailing `/` is added if missing)
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        let mut base_uri = base_uri.into();
        if !base_uri.ends_with('/') {
            base_uri.push('/');
        }
        self.base_api_uri = base_uri;
        self
    }

    /// Set the OAuth token endpoint
    pub fn with_token_uri(mut self, token_uri: impl Into<String>) -> Self {
        self.token_uri = token_uri.into();
        self
    }

    /// Trust an extra CA certificate
    pub fn with_ca_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(path.into());
        self
    }

    /// Enable or disable TLS certificate validation
    pub fn with_strict_ssl(mut self, strict: bool) -> Self {
        self.strict_ssl = strict;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the refresh token
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Set the `CB-VERSION` header value
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() {
                "[REDACTED]"
            } else {
                "None"
            }
        }

        f.debug_struct("ClientConfig")
            .field("base_api_uri", &self.base_api_uri)
            .field("token_uri", &self.token_uri)
            .field("ca_file", &self.ca_file)
            .field("strict_ssl", &self.strict_ssl)
            .field("timeout", &self.timeout)
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("api_key_name", &self.api_key_name)
            .field("api_private_key", &redact(&self.api_private_key))
            .field("version", &self.version)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
