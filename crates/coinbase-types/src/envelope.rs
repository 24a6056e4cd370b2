//! The `{ data, pagination }` response wrapper and error entries

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::pagination::Pagination;

/// Standard Coinbase v2 response wrapper
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope {
    /// A single object or an array of objects
    pub data: Value,
    /// Cursor metadata (list endpoints only)
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A single entry of an error envelope
///
/// v2 endpoints report `{"errors": [{"id": ..., "message": ...}]}`, the
/// OAuth token endpoint reports `{"error": ..., "error_description": ...}`.
/// Both shapes are normalised into this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine readable error id (e.g., "not_found", "invalid_token")
    #[serde(default)]
    pub id: Option<String>,
    /// Human readable message
    #[serde(default)]
    pub message: String,
    /// Link to documentation for the error
    #[serde(default)]
    pub url: Option<String>,
}

impl ApiErrorDetail {
    /// Extract error entries from a decoded response body
    ///
    /// Returns `None` when the body carries neither `errors` nor `error`.
    pub fn from_body(body: &Value) -> Option<Vec<ApiErrorDetail>> {
        let object = body.as_object()?;

        if let Some(errors) = object.get("errors") {
            return Some(match errors {
                Value::Array(entries) => entries.iter().map(Self::from_entry).collect(),
                other => vec![Self::from_entry(other)],
            });
        }

        let error = object.get("error")?;
        let description = object
            .get("error_description")
            .and_then(Value::as_str)
            .map(str::to_string);

        Some(vec![match error {
            Value::String(id) => ApiErrorDetail {
                id: Some(id.clone()),
                message: description.unwrap_or_else(|| id.clone()),
                url: None,
            },
            other => Self::from_entry(other),
        }])
    }

    fn from_entry(entry: &Value) -> ApiErrorDetail {
        match entry {
            Value::String(message) => ApiErrorDetail {
                id: None,
                message: message.clone(),
                url: None,
            },
            other => serde_json::from_value(other.clone()).unwrap_or_else(|_| ApiErrorDetail {
                id: None,
                message: other.to_string(),
                url: None,
            }),
        }
    }
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{}: {}", id, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
