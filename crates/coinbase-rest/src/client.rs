//! Main REST client implementation

use std::sync::Arc;

use async_trait::async_trait;
use coinbase_auth::{build_headers, AuthMode, Credentials};
use coinbase_types::{map_envelope, ApiResource, Resource};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use secrecy::SecretString;
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::classify::{classify, classify_optional};
use crate::config::ClientConfig;
use crate::error::{RestError, RestResult};
use crate::transport::{redact_url, HttpTransport, ReqwestTransport, SignedRequest};

/// The four HTTP verbs every endpoint is built from
///
/// Paths are relative to the API root (e.g., `"accounts"`,
/// `"accounts/abc/transactions?limit=5"`). Every call signs the request,
/// sends it once, and classifies the response.
#[async_trait]
pub trait HttpVerbs {
    /// GET with optional query parameters (form-urlencoded)
    async fn get_http(&self, path: &str, query: &[(&str, String)]) -> RestResult<Value>;

    /// POST a JSON body (`{}` when none is given)
    async fn post_http(&self, path: &str, body: Option<Value>) -> RestResult<Value>;

    /// PUT a JSON body
    async fn put_http(&self, path: &str, body: Option<Value>) -> RestResult<Value>;

    /// DELETE; an empty response body is success
    async fn delete_http(&self, path: &str) -> RestResult<Option<Value>>;
}

/// Coinbase App REST v2 client
///
/// Cloning is cheap; clones share the transport and credentials.
///
/// # Example
///
/// ```no_run
/// use coinbase_rest::{ClientConfig, CoinbaseClient};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinbaseClient::new(ClientConfig::from_env()?)?;
///
///     let user = client.get_current_user().await?;
///     println!("Signed in as {:?}", user.name);
///
///     let accounts = client.get_accounts(Default::default()).await?;
///     for account in accounts.items {
///         println!("{} {:?}", account.id, account.balance);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinbaseClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<Credentials>,
    base_api_uri: String,
    token_uri: String,
    refresh_token: Option<Arc<SecretString>>,
    version: String,
    user_agent: String,
}

impl CoinbaseClient {
    /// Create a client with the reqwest transport
    ///
    /// Fails with [`RestError::Configuration`] unless exactly one credential
    /// strategy is configured, or if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> RestResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> RestResult<Self> {
        let credentials = Credentials::resolve(
            config.access_token.as_deref(),
            config.api_key_name.as_deref(),
            config.api_private_key.as_deref(),
        )?;

        info!(
            mode = ?credentials.mode(),
            base_uri = %config.base_api_uri,
            "Created Coinbase REST client"
        );

        Ok(Self {
            transport,
            credentials: Arc::new(credentials),
            base_api_uri: config.base_api_uri,
            token_uri: config.token_uri,
            refresh_token: config
                .refresh_token
                .filter(|token| !token.is_empty())
                .map(|token| Arc::new(SecretString::from(token))),
            version: config.version,
            user_agent: config.user_agent,
        })
    }

    /// Credential strategy in use
    pub fn auth_mode(&self) -> AuthMode {
        self.credentials.mode()
    }

    /// API root requests are issued against
    pub fn base_api_uri(&self) -> &str {
        &self.base_api_uri
    }

    pub(crate) fn token_uri(&self) -> &str {
        &self.token_uri
    }

    pub(crate) fn refresh_token(&self) -> Option<&SecretString> {
        self.refresh_token.as_deref()
    }

    /// Copy of this client using a new access token (and refresh token, if given)
    pub(crate) fn with_token(&self, access_token: &str, refresh_token: Option<&str>) -> Self {
        let mut client = self.clone();
        client.credentials = Arc::new(Credentials::access_token(access_token));
        if let Some(refresh_token) = refresh_token.filter(|token| !token.is_empty()) {
            client.refresh_token = Some(Arc::new(SecretString::from(refresh_token.to_string())));
        }
        client
    }

    /// Build and sign a request for a path relative to the API root
    ///
    /// In token mode the access token is appended to the query string; in
    /// key-pair mode the HMAC headers and a fresh bearer token are attached.
    pub fn prepare(&self, method: Method, path: &str, body: Option<String>) -> RestResult<SignedRequest> {
        let path = self.credentials.authorize_path(path);
        let url = format!("{}{}", self.base_api_uri, path);
        self.sign(method, url, &path, body)
    }

    /// Build an unauthenticated request to an absolute URL (OAuth token endpoint)
    pub(crate) fn prepare_unsigned(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
    ) -> RestResult<SignedRequest> {
        Ok(SignedRequest {
            url: url.to_string(),
            method,
            headers: self.base_headers()?,
            body,
        })
    }

    fn base_headers(&self) -> RestResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, header_value(&self.user_agent)?);
        Ok(headers)
    }

    fn sign(&self, method: Method, url: String, path: &str, body: Option<String>) -> RestResult<SignedRequest> {
        let auth = build_headers(
            &self.credentials,
            &url,
            path,
            method.as_str(),
            body.as_deref().unwrap_or(""),
            &self.version,
        )?;

        let mut headers = self.base_headers()?;
        for (name, value) in auth.to_pairs() {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| RestError::InvalidParameter(format!("invalid header name {}: {}", name, e)))?;
            headers.insert(name, header_value(&value)?);
        }

        debug!(
            method = %method,
            url = %redact_url(&url),
            mode = ?self.credentials.mode(),
            "Prepared request"
        );

        Ok(SignedRequest {
            url,
            method,
            headers,
            body,
        })
    }

    /// Send a request once and classify the response
    pub(crate) async fn execute(&self, request: SignedRequest) -> RestResult<Value> {
        let url = request.redacted_url();
        let response = self.transport.execute(request).await?;
        classify(response, &url)
    }

    async fn send(&self, method: Method, path: &str, body: Option<String>) -> RestResult<Value> {
        let request = self.prepare(method, path, body)?;
        self.execute(request).await
    }

    // ========================================================================
    // Mapped helpers
    // ========================================================================

    /// GET a single object and map it through the resource registry
    pub async fn get_resource(&self, path: &str) -> RestResult<Resource> {
        let body = self.get_http(path, &[]).await?;
        Ok(map_envelope(body)?)
    }

    /// GET a single object of a known model
    pub async fn get_one<T: ApiResource>(&self, path: &str) -> RestResult<T> {
        expect_resource(self.get_resource(path).await?)
    }

    /// POST and map the created object
    pub async fn post_one<T: ApiResource>(&self, path: &str, body: Option<Value>) -> RestResult<T> {
        let body = self.post_http(path, body).await?;
        expect_resource(map_envelope(body)?)
    }

    /// PUT and map the updated object
    pub async fn put_one<T: ApiResource>(&self, path: &str, body: Option<Value>) -> RestResult<T> {
        let body = self.put_http(path, body).await?;
        expect_resource(map_envelope(body)?)
    }

    /// GET a non-resource payload and return its `data` field
    pub async fn get_data(&self, path: &str, query: &[(&str, String)]) -> RestResult<Value> {
        let mut body = self.get_http(path, query).await?;
        match body.get_mut("data") {
            Some(data) => Ok(data.take()),
            None => Ok(body),
        }
    }
}

#[async_trait]
impl HttpVerbs for CoinbaseClient {
    #[instrument(skip(self, query))]
    async fn get_http(&self, path: &str, query: &[(&str, String)]) -> RestResult<Value> {
        let path = if query.is_empty() {
            path.to_string()
        } else {
            let encoded = serde_urlencoded::to_string(query)
                .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
            let separator = if path.contains('?') { '&' } else { '?' };
            format!("{}{}{}", path, separator, encoded)
        };

        self.send(Method::GET, &path, None).await
    }

    #[instrument(skip(self, body))]
    async fn post_http(&self, path: &str, body: Option<Value>) -> RestResult<Value> {
        let body = body.unwrap_or_else(|| Value::Object(Default::default()));
        self.send(Method::POST, path, Some(body.to_string())).await
    }

    #[instrument(skip(self, body))]
    async fn put_http(&self, path: &str, body: Option<Value>) -> RestResult<Value> {
        self.send(Method::PUT, path, body.map(|b| b.to_string())).await
    }

    #[instrument(skip(self))]
    async fn delete_http(&self, path: &str) -> RestResult<Option<Value>> {
        let request = self.prepare(Method::DELETE, path, None)?;
        let url = request.redacted_url();
        let response = self.transport.execute(request).await?;
        classify_optional(response, &url)
    }
}

impl std::fmt::Debug for CoinbaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseClient")
            .field("base_api_uri", &self.base_api_uri)
            .field("auth_mode", &self.credentials.mode())
            .field("version", &self.version)
            .finish()
    }
}

/// Convert a mapped resource into the expected model
pub fn expect_resource<T: ApiResource>(resource: Resource) -> RestResult<T> {
    T::try_from(resource).map_err(|other| RestError::UnexpectedResource {
        expected: T::RESOURCE,
        found: other.kind().unwrap_or("raw").to_string(),
    })
}

fn header_value(value: &str) -> RestResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| RestError::InvalidParameter(format!("invalid header value: {}", e)))
}
