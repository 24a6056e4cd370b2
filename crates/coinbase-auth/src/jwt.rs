//! ES256 bearer tokens for CDP API keys
//!
//! Every request in key-pair mode carries a short-lived JWT bound to the
//! request method and URI. The JOSE header includes a random `nonce`, which
//! `jsonwebtoken::Header` cannot express, so the header and claims are
//! serialized here and only the signature is delegated to `jsonwebtoken`.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64_URL, Engine};
use chrono::Utc;
use jsonwebtoken::Algorithm;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::AuthResult;
use crate::key::load_signing_key;

/// Issuer claim expected by the API
pub const TOKEN_ISSUER: &str = "cdp";
/// Token lifetime in seconds
pub const TOKEN_TTL_SECS: i64 = 120;
/// Nonce length in bytes before hex encoding
const NONCE_BYTES: usize = 16;

/// JWT claim set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub nbf: i64,
    pub exp: i64,
    pub sub: String,
    pub uri: String,
}

impl TokenClaims {
    /// Claims for a request issued at `now`
    pub fn new(url: &str, method: &str, key_name: &str, now: i64) -> Self {
        Self {
            iss: TOKEN_ISSUER.to_string(),
            nbf: now,
            exp: now + TOKEN_TTL_SECS,
            sub: key_name.to_string(),
            uri: token_uri(url, method),
        }
    }
}

/// JOSE header with the anti-replay nonce
#[derive(Debug, Serialize)]
struct TokenHeader<'a> {
    alg: &'static str,
    typ: &'static str,
    kid: &'a str,
    nonce: String,
}

/// The `uri` claim: `"<METHOD> <host><path>"`
///
/// The scheme and any query string are dropped, so the bearer token does not
/// bind query parameters: a token minted for `accounts?limit=5` is equally
/// valid for `accounts?limit=100`. In key-pair mode the query is still
/// covered by the `CB-ACCESS-SIGN` HMAC, which signs the path with its query.
pub fn token_uri(url: &str, method: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let without_query = without_scheme
        .split_once('?')
        .map_or(without_scheme, |(path, _)| path);
    format!("{} {}", method, without_query)
}

/// Random 16-byte nonce, hex encoded
fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Sign a bearer token for a request at the current time
///
/// # Arguments
/// * `url` - Full request URL
/// * `method` - HTTP method in upper case
/// * `key_name` - CDP API key name (`sub` claim and `kid` header)
/// * `private_key` - EC private key PEM (SEC1 or PKCS#8)
pub fn sign_token(url: &str, method: &str, key_name: &str, private_key: &str) -> AuthResult<String> {
    sign_token_at(url, method, key_name, private_key, Utc::now().timestamp())
}

/// Sign a bearer token issued at a fixed time
pub fn sign_token_at(
    url: &str,
    method: &str,
    key_name: &str,
    private_key: &str,
    now: i64,
) -> AuthResult<String> {
    let key = load_signing_key(private_key)?;

    let header = TokenHeader {
        alg: "ES256",
        typ: "JWT",
        kid: key_name,
        nonce: generate_nonce(),
    };
    let claims = TokenClaims::new(url, method, key_name, now);

    let signing_input = format!(
        "{}.{}",
        BASE64_URL.encode(serde_json::to_vec(&header)?),
        BASE64_URL.encode(serde_json::to_vec(&claims)?)
    );
    let signature = jsonwebtoken::crypto::sign(signing_input.as_bytes(), &key, Algorithm::ES256)?;

    Ok(format!("{}.{}", signing_input, signature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::tests::{TEST_PKCS8_KEY, TEST_PUBLIC_KEY, TEST_SEC1_KEY};
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use serde_json::Value;

    const KEY_NAME: &str = "organizations/org-id/apiKeys/key-id";

    fn decode_segment(segment: &str) -> Value {
        serde_json::from_slice(&BASE64_URL.decode(segment).unwrap()).unwrap()
    }

    fn verify(token: &str) -> TokenClaims {
        let key = DecodingKey::from_ec_pem(TEST_PUBLIC_KEY.as_bytes()).unwrap();
        let mut validation = Validation::new(Algorithm::ES256);
        validation.validate_nbf = true;
        validation.set_required_spec_claims(&["exp", "nbf", "sub"]);
        decode::<TokenClaims>(token, &key, &validation).unwrap().claims
    }

    #[test]
    fn test_token_uri() {
        assert_eq!(
            token_uri("https://api.coinbase.com/v2/accounts", "GET"),
            "GET api.coinbase.com/v2/accounts"
        );
        assert_eq!(
            token_uri("https://api.coinbase.com/v2/accounts?limit=5", "GET"),
            "GET api.coinbase.com/v2/accounts"
        );
        assert_eq!(
            token_uri("http://127.0.0.1:8080/v2/user", "POST"),
            "POST 127.0.0.1:8080/v2/user"
        );
    }

    #[test]
    fn test_query_string_not_in_claims() {
        let with_query = sign_token_at(
            "https://api.coinbase.com/v2/accounts?limit=5&order=desc",
            "GET",
            KEY_NAME,
            TEST_SEC1_KEY,
            1_700_000_000,
        )
        .unwrap();

        let payload = decode_segment(with_query.split('.').nth(1).unwrap());
        assert_eq!(payload["uri"], "GET api.coinbase.com/v2/accounts");
    }

    #[test]
    fn test_claims() {
        let token = sign_token(
            "https://api.coinbase.com/v2/accounts",
            "GET",
            KEY_NAME,
            TEST_SEC1_KEY,
        )
        .unwrap();

        let claims = verify(&token);
        assert_eq!(claims.exp - claims.nbf, 120);
        assert_eq!(claims.iss, "cdp");
        assert_eq!(claims.sub, KEY_NAME);
        assert_eq!(claims.uri, "GET api.coinbase.com/v2/accounts");
    }

    #[test]
    fn test_header() {
        let token = sign_token(
            "https://api.coinbase.com/v2/user",
            "GET",
            KEY_NAME,
            TEST_PKCS8_KEY,
        )
        .unwrap();

        let segments: Vec<_> = token.split('.').collect();
        assert_eq!(segments.len(), 3);

        let header = decode_segment(segments[0]);
        assert_eq!(header["alg"], "ES256");
        assert_eq!(header["typ"], "JWT");
        assert_eq!(header["kid"], KEY_NAME);

        let nonce = header["nonce"].as_str().unwrap();
        assert_eq!(nonce.len(), 32);
        assert!(nonce.chars().all(|c| c.is_ascii_hexdigit()));

        verify(&token);
    }

    #[test]
    fn test_fixed_time_claims() {
        let token = sign_token_at(
            "https://api.coinbase.com/v2/accounts",
            "DELETE",
            KEY_NAME,
            TEST_SEC1_KEY,
            1_700_000_000,
        )
        .unwrap();

        let payload = decode_segment(token.split('.').nth(1).unwrap());
        assert_eq!(payload["nbf"], 1_700_000_000);
        assert_eq!(payload["exp"], 1_700_000_120);
        assert_eq!(payload["uri"], "DELETE api.coinbase.com/v2/accounts");
    }

    #[test]
    fn test_nonce_is_fresh() {
        let url = "https://api.coinbase.com/v2/accounts";
        let a = sign_token(url, "GET", KEY_NAME, TEST_SEC1_KEY).unwrap();
        let b = sign_token(url, "GET", KEY_NAME, TEST_SEC1_KEY).unwrap();

        let nonce_a = decode_segment(a.split('.').next().unwrap())["nonce"].clone();
        let nonce_b = decode_segment(b.split('.').next().unwrap())["nonce"].clone();
        assert_ne!(nonce_a, nonce_b);
    }

    #[test]
    fn test_invalid_key() {
        let result = sign_token("https://api.coinbase.com/v2/user", "GET", KEY_NAME, "nope");
        assert!(result.is_err());
    }
}
