//! Authentication for the Coinbase App REST API v2
//!
//! This crate resolves which credential strategy a client uses and computes
//! the per-request authentication material:
//!
//! - HMAC-SHA256 signatures (`CB-ACCESS-SIGN` / `CB-ACCESS-TIMESTAMP`)
//! - ES256 bearer JWTs bound to the request method and URI
//! - `access_token` query parameters for OAuth tokens
//!
//! # Example
//!
//! ```no_run
//! use coinbase_auth::{build_headers, Credentials, DEFAULT_API_VERSION};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads COINBASE_API_KEY_NAME / COINBASE_API_PRIVATE_KEY or COINBASE_ACCESS_TOKEN
//!     let creds = Credentials::from_env()?;
//!
//!     let url = "https://api.coinbase.com/v2/accounts";
//!     let headers = build_headers(&creds, url, "accounts", "GET", "", DEFAULT_API_VERSION)?;
//!     for (name, value) in headers.to_pairs() {
//!         println!("{}: {} bytes", name, value.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;
mod headers;
mod jwt;
mod key;
mod signature;

pub use credentials::{
    AuthMode, Credentials, ENV_ACCESS_TOKEN, ENV_API_KEY_NAME, ENV_API_PRIVATE_KEY,
};
pub use error::{AuthError, AuthResult};
pub use headers::{
    build_headers, AuthHeaderSet, DEFAULT_API_VERSION, HEADER_ACCESS_KEY, HEADER_ACCESS_SIGN,
    HEADER_ACCESS_TIMESTAMP, HEADER_AUTHORIZATION, HEADER_VERSION,
};
pub use jwt::{sign_token, sign_token_at, token_uri, TokenClaims, TOKEN_ISSUER, TOKEN_TTL_SECS};
pub use key::load_signing_key;
pub use signature::{sign_hmac, sign_hmac_at, HmacSignature};
