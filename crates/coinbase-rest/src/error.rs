//! Error types for REST API operations

use coinbase_auth::AuthError;
use coinbase_types::ApiErrorDetail;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Missing or ambiguous client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request signing failed
    #[error("Authentication error: {0}")]
    Auth(AuthError),

    /// Network, DNS or TLS failure
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Status code
        status: u16,
        /// Request URL, with secret query values redacted
        url: String,
        /// Raw response text, unparsed
        body: String,
    },

    /// Successful status with an empty body
    #[error("Empty response")]
    EmptyResponse,

    /// Body was not valid JSON, or did not fit the expected shape
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Server reported errors in the response envelope
    #[error("API error: {}", format_api_errors(.errors))]
    Api {
        /// Error entries from the envelope
        errors: Vec<ApiErrorDetail>,
    },

    /// A resource of a different type than expected came back
    #[error("Unexpected resource: expected {expected}, got {found}")]
    UnexpectedResource {
        expected: &'static str,
        found: String,
    },

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

fn format_api_errors(errors: &[ApiErrorDetail]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<AuthError> for RestError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Configuration(message) => Self::Configuration(message),
            other => Self::Auth(other),
        }
    }
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            // reqwest keeps the request URL, which carries the token in token mode
            Self::Transport(err.without_url())
        }
    }
}

impl RestError {
    /// HTTP status code, if the server answered with a failure status
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this error is a timeout
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Error entries reported by the API, if any
    pub fn api_errors(&self) -> Option<&[ApiErrorDetail]> {
        match self {
            Self::Api { errors } => Some(errors),
            _ => None,
        }
    }

    /// Check if the server rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
            || self.api_errors().is_some_and(|errors| {
                errors.iter().any(|e| {
                    matches!(
                        e.id.as_deref(),
                        Some("authentication_error" | "invalid_token" | "expired_token" | "revoked_token")
                    )
                })
            })
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
