//! Authentication headers for a single request

use secrecy::ExposeSecret;
use tracing::debug;

use crate::credentials::Credentials;
use crate::error::AuthResult;
use crate::jwt::sign_token;
use crate::signature::{sign_hmac, HmacSignature};

/// Default `CB-VERSION` sent with key-pair requests
pub const DEFAULT_API_VERSION: &str = "2025-01-28";

pub const HEADER_ACCESS_KEY: &str = "CB-ACCESS-KEY";
pub const HEADER_ACCESS_SIGN: &str = "CB-ACCESS-SIGN";
pub const HEADER_ACCESS_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";
pub const HEADER_VERSION: &str = "CB-VERSION";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// Headers proving possession of the credentials
///
/// Computed fresh for every request, never cached: both the HMAC
/// timestamp and the token nonce must be new each time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthHeaderSet {
    /// Key-pair mode: legacy HMAC headers and a bearer JWT, always together
    KeyPair {
        access_key: String,
        signature: HmacSignature,
        version: String,
        bearer_token: String,
    },
    /// Token mode authenticates through the query string instead
    None,
}

impl AuthHeaderSet {
    /// Header name/value pairs to attach
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::KeyPair {
                access_key,
                signature,
                version,
                bearer_token,
            } => vec![
                (HEADER_ACCESS_KEY, access_key.clone()),
                (HEADER_ACCESS_SIGN, signature.digest.clone()),
                (HEADER_ACCESS_TIMESTAMP, signature.timestamp.to_string()),
                (HEADER_VERSION, version.clone()),
                (HEADER_AUTHORIZATION, format!("Bearer {}", bearer_token)),
            ],
            Self::None => Vec::new(),
        }
    }

    /// Check if any headers are attached
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }
}

/// Build the authentication headers for a request
///
/// # Arguments
/// * `credentials` - Resolved credentials
/// * `url` - Full request URL (bound into the JWT `uri` claim)
/// * `path` - Path relative to the API root, with query string (HMAC message)
/// * `method` - HTTP method in upper case
/// * `body` - Serialized body, empty for none
/// * `version` - Value for `CB-VERSION`
pub fn build_headers(
    credentials: &Credentials,
    url: &str,
    path: &str,
    method: &str,
    body: &str,
    version: &str,
) -> AuthResult<AuthHeaderSet> {
    match credentials {
        Credentials::AccessToken { .. } => Ok(AuthHeaderSet::None),
        Credentials::ApiKey {
            key_name,
            private_key,
        } => {
            let signature = sign_hmac(path, method, body, private_key.expose_secret());
            let bearer_token = sign_token(url, method, key_name, private_key.expose_secret())?;

            debug!(method, path, "Signed request");

            Ok(AuthHeaderSet::KeyPair {
                access_key: key_name.clone(),
                signature,
                version: version.to_string(),
                bearer_token,
            })
        }
    }
}
