//! OAuth token refresh

use coinbase_auth::AuthMode;
use reqwest::Method;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::client::CoinbaseClient;
use crate::error::{RestError, RestResult};

/// Token pair issued by the OAuth token endpoint
#[derive(Clone, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl std::fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuthToken")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("scope", &self.scope)
            .finish()
    }
}

impl CoinbaseClient {
    /// Exchange the configured refresh token for a new token pair
    ///
    /// Only available in token mode with a refresh token configured. The
    /// request goes to the configured token endpoint without the access
    /// token attached. Returns the new tokens and a client that uses them.
    #[instrument(skip(self, client_secret))]
    pub async fn refresh_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> RestResult<(OAuthToken, CoinbaseClient)> {
        if self.auth_mode() != AuthMode::Token {
            return Err(RestError::Configuration(
                "token refresh requires OAuth access token credentials".into(),
            ));
        }
        let refresh_token = self
            .refresh_token()
            .ok_or_else(|| RestError::Configuration("no refresh token configured".into()))?;

        let body = json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh_token.expose_secret(),
            "client_id": client_id,
            "client_secret": client_secret,
        });

        let request = self.prepare_unsigned(Method::POST, self.token_uri(), Some(body.to_string()))?;
        let token: OAuthToken = serde_json::from_value(self.execute(request).await?)?;

        info!(expires_in = ?token.expires_in, "Refreshed access token");

        let client = self.with_token(&token.access_token, token.refresh_token.as_deref());
        Ok((token, client))
    }
}
