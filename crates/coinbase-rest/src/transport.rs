//! HTTP transport abstraction
//!
//! The client builds and signs a [`SignedRequest`] and hands it to an
//! [`HttpTransport`], which performs exactly one network call. The trait
//! lets the request pipeline be unit tested without a network, using
//! [`MockTransport`].

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Certificate, Client, Method, Url};
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::error::{RestError, RestResult};

/// A fully built, authenticated request
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    /// JSON text, if the request has a body
    pub body: Option<String>,
}

impl SignedRequest {
    /// Header value as a string, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// URL safe to log or attach to an error
    pub fn redacted_url(&self) -> String {
        redact_url(&self.url)
    }
}

/// Query parameters whose values never leave the request itself
const SECRET_QUERY_PARAMS: &[&str] = &["access_token"];

const REDACTED: &str = "REDACTED";

/// Replace secret query values in a URL
///
/// A URL that cannot be parsed loses its whole query string.
pub fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.split('?').next().unwrap_or_default().to_string();
    };

    let is_secret = |name: &str| SECRET_QUERY_PARAMS.contains(&name);
    if !parsed.query_pairs().any(|(name, _)| is_secret(&name)) {
        return url.to_string();
    }

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(name, value)| {
            let value = if is_secret(&name) {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}

/// Status and raw text of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Check if the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP transport abstraction
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute a request once
    ///
    /// Transport failures and timeouts are errors; any HTTP status,
    /// including failures, is returned as a [`RawResponse`].
    async fn execute(&self, request: SignedRequest) -> RestResult<RawResponse>;
}

/// Real transport using reqwest
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport from client configuration
    ///
    /// Applies the timeout, TLS strictness, extra CA certificate and user agent.
    pub fn new(config: &ClientConfig) -> RestResult<Self> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .danger_accept_invalid_certs(!config.strict_ssl);

        if let Some(path) = &config.ca_file {
            let pem = std::fs::read(path).map_err(|e| {
                RestError::Configuration(format!("cannot read CA file {}: {}", path.display(), e))
            })?;
            let certificate = Certificate::from_pem(&pem).map_err(|e| {
                RestError::Configuration(format!("invalid CA file {}: {}", path.display(), e))
            })?;
            builder = builder.add_root_certificate(certificate);
        }

        let client = builder
            .build()
            .map_err(|e| RestError::Configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Wrap an existing reqwest client
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.redacted_url()))]
    async fn execute(&self, request: SignedRequest) -> RestResult<RawResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, len = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }
}

/// Mock transport for testing
///
/// Replays queued responses in order and records every request it sees.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Default)]
pub struct MockTransport {
    responses: parking_lot::Mutex<std::collections::VecDeque<RestResult<RawResponse>>>,
    requests: parking_lot::Mutex<Vec<SignedRequest>>,
}

#[cfg(any(test, feature = "test-utils"))]
impl MockTransport {
    /// Create a new mock transport
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response
    pub fn push_response(&self, status: u16, body: impl Into<String>) {
        self.responses
            .lock()
            .push_back(Ok(RawResponse::new(status, body)));
    }

    /// Queue a JSON response with status 200
    pub fn push_json(&self, body: &serde_json::Value) {
        self.push_response(200, body.to_string());
    }

    /// Queue a transport-level error
    pub fn push_error(&self, error: RestError) {
        self.responses.lock().push_back(Err(error));
    }

    /// Requests seen so far
    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().clone()
    }

    /// Most recent request
    pub fn last_request(&self) -> Option<SignedRequest> {
        self.requests.lock().last().cloned()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl HttpTransport for MockTransport {
    async fn execute(&self, request: SignedRequest) -> RestResult<RawResponse> {
        self.requests.lock().push(request);
        self.responses.lock().pop_front().unwrap_or_else(|| {
            Err(RestError::InvalidParameter(
                "mock transport has no queued response".into(),
            ))
        })
    }
}
