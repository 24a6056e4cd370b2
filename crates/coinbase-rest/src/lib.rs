//! REST client for the Coinbase App API v2
//!
//! Every call follows the same pipeline: pick the credential strategy, sign
//! the request, send it once, classify the response, and map the `data`
//! payload onto a typed model.
//!
//! # Features
//!
//! - **Accounts**: wallets, addresses, transactions, buys, sells, deposits, withdrawals
//! - **User**: current user, public profiles, permissions
//! - **Payment methods** and **notifications**
//! - **Data**: currencies, exchange rates, prices, server time
//! - **Pagination**: cursor following and page walking
//!
//! # Authentication
//!
//! A client is built with exactly one of:
//!
//! - an OAuth access token, sent as an `access_token` query parameter
//! - a CDP API key pair, used to sign HMAC headers and an ES256 bearer JWT
//!
//! # Example
//!
//! ```no_run
//! use coinbase_rest::{ClientConfig, CoinbaseClient, ListOptions, ListRequest};
//! use coinbase_rest::types::Account;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::with_api_key(
//!         std::env::var("COINBASE_API_KEY_NAME")?,
//!         std::env::var("COINBASE_API_PRIVATE_KEY")?,
//!     );
//!     let client = CoinbaseClient::new(config)?;
//!
//!     // First page only
//!     let page = client.get_accounts(ListOptions::new().limit(25)).await?;
//!     println!("{} accounts on the first page", page.len());
//!
//!     // Every page
//!     let all: Vec<Account> = client.get_all(ListRequest::collection("accounts")).await?;
//!     println!("{} accounts in total", all.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Each call resolves to one [`RestError`]: transport failures and timeouts,
//! non-2xx statuses (raw body kept, never parsed), empty bodies, invalid
//! JSON, and error envelopes reported by the API. Nothing is retried.

pub mod classify;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod pagination;
pub mod transport;

// Re-export main types
pub use client::{expect_resource, CoinbaseClient, HttpVerbs};
pub use config::ClientConfig;
pub use endpoints::{AccountEndpoints, OAuthToken, PriceKind};
pub use error::{RestError, RestResult};
pub use transport::{HttpTransport, RawResponse, ReqwestTransport, SignedRequest};

#[cfg(any(test, feature = "test-utils"))]
pub use transport::MockTransport;

pub use coinbase_auth::{AuthMode, Credentials};
pub use coinbase_types::{ListOptions, ListRequest, Page, Pagination, Resource, SortOrder};

/// Resource models and mapping helpers
pub use coinbase_types as types;
