//! Error types for authentication operations

/// Errors that can occur while resolving credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Credentials are missing or ambiguous
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Private key could not be parsed
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Token signing failed
    #[error("Signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Token header or claims could not be serialized
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
