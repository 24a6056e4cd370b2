//! Credential strategy for the Coinbase API
//!
//! A client authenticates in exactly one of two ways:
//!
//! - **Token mode**: an OAuth access token, sent as an `access_token` query
//!   parameter on every request.
//! - **Key-pair mode**: a CDP API key name plus its EC private key, used to
//!   sign every request (HMAC headers and an ES256 bearer JWT).
//!
//! # Security
//!
//! Secrets are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, AuthResult};

/// Environment variable holding an OAuth access token
pub const ENV_ACCESS_TOKEN: &str = "COINBASE_ACCESS_TOKEN";
/// Environment variable holding the CDP API key name
pub const ENV_API_KEY_NAME: &str = "COINBASE_API_KEY_NAME";
/// Environment variable holding the CDP API private key (PEM)
pub const ENV_API_PRIVATE_KEY: &str = "COINBASE_API_PRIVATE_KEY";

/// Which authentication strategy a set of credentials uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// OAuth access token in the query string
    Token,
    /// Signed headers from an API key pair
    KeyPair,
}

/// Resolved credentials, exactly one strategy
pub enum Credentials {
    /// OAuth access token
    AccessToken { token: SecretString },
    /// CDP API key name and EC private key
    ApiKey {
        key_name: String,
        private_key: SecretString,
    },
}

impl Credentials {
    /// Token-mode credentials
    pub fn access_token(token: impl Into<String>) -> Self {
        Self::AccessToken {
            token: SecretString::from(token.into()),
        }
    }

    /// Key-pair credentials
    ///
    /// Literal `\n` sequences in the key are turned into newlines, since
    /// PEM keys pasted into environment files usually arrive escaped.
    pub fn api_key(key_name: impl Into<String>, private_key: impl AsRef<str>) -> Self {
        Self::ApiKey {
            key_name: key_name.into(),
            private_key: SecretString::from(normalize_newlines(private_key.as_ref())),
        }
    }

    /// Pick the strategy from optional settings
    ///
    /// Exactly one of `access_token` or (`key_name` and `private_key`) must be
    /// present. Empty strings count as absent.
    pub fn resolve(
        access_token: Option<&str>,
        key_name: Option<&str>,
        private_key: Option<&str>,
    ) -> AuthResult<Self> {
        let access_token = access_token.filter(|s| !s.is_empty());
        let key_pair = match (
            key_name.filter(|s| !s.is_empty()),
            private_key.filter(|s| !s.is_empty()),
        ) {
            (Some(name), Some(key)) => Some((name, key)),
            _ => None,
        };

        match (access_token, key_pair) {
            (Some(token), None) => Ok(Self::access_token(token)),
            (None, Some((name, key))) => Ok(Self::api_key(name, key)),
            (Some(_), Some(_)) => Err(AuthError::Configuration(
                "provide either an access token or an API key pair, not both".to_string(),
            )),
            (None, None) => Err(AuthError::Configuration(
                "you must provide either an access token or both an API key name and an API private key"
                    .to_string(),
            )),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `COINBASE_ACCESS_TOKEN`, `COINBASE_API_KEY_NAME` and
    /// `COINBASE_API_PRIVATE_KEY`, then applies the same rules as [`resolve`](Self::resolve).
    pub fn from_env() -> AuthResult<Self> {
        let access_token = std::env::var(ENV_ACCESS_TOKEN).ok();
        let key_name = std::env::var(ENV_API_KEY_NAME).ok();
        let private_key = std::env::var(ENV_API_PRIVATE_KEY).ok();

        Self::resolve(
            access_token.as_deref(),
            key_name.as_deref(),
            private_key.as_deref(),
        )
    }

    /// Strategy in use
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::AccessToken { .. } => AuthMode::Token,
            Self::ApiKey { .. } => AuthMode::KeyPair,
        }
    }

    /// API key name (key-pair mode only)
    pub fn key_name(&self) -> Option<&str> {
        match self {
            Self::ApiKey { key_name, .. } => Some(key_name),
            Self::AccessToken { .. } => None,
        }
    }

    /// Append the access token to a request path (token mode only)
    ///
    /// Uses `&` when the path already has a query string, `?` otherwise.
    /// Key-pair credentials return the path unchanged.
    pub fn authorize_path(&self, path: &str) -> String {
        match self {
            Self::AccessToken { token } => {
                let separator = if path.contains('?') { '&' } else { '?' };
                let param = serde_urlencoded::to_string([("access_token", token.expose_secret())])
                    .unwrap_or_default();
                format!("{}{}{}", path, separator, param)
            }
            Self::ApiKey { .. } => path.to_string(),
        }
    }
}

/// Replace escaped `\n` sequences with real newlines
fn normalize_newlines(key: &str) -> String {
    key.replace("\\n", "\n")
}

impl Clone for Credentials {
    /// Clone credentials (creates new secret boxes with the same content)
    fn clone(&self) -> Self {
        match self {
            Self::AccessToken { token } => Self::access_token(token.expose_secret()),
            Self::ApiKey {
                key_name,
                private_key,
            } => Self::ApiKey {
                key_name: key_name.clone(),
                private_key: SecretString::from(private_key.expose_secret().to_string()),
            },
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AccessToken { .. } => f
                .debug_struct("Credentials::AccessToken")
                .field("token", &"[REDACTED]")
                .finish(),
            Self::ApiKey { key_name, .. } => f
                .debug_struct("Credentials::ApiKey")
                .field(
                    "key_name",
                    &format!("{}...", key_name.chars().take(8).collect::<String>()),
                )
                .field("private_key", &"[REDACTED]")
                .finish(),
        }
    }
}
