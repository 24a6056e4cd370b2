//! Response classification
//!
//! Turns a [`RawResponse`] into decoded JSON or exactly one error, checked in
//! this order: HTTP status, empty body, JSON decoding, error envelope.

use coinbase_types::ApiErrorDetail;
use serde_json::Value;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::transport::RawResponse;

/// Fail on a non-2xx status without looking at the body
///
/// `url` ends up in logs and in the error, so callers pass a redacted URL.
pub fn check_status(response: &RawResponse, url: &str) -> RestResult<()> {
    if response.is_success() {
        return Ok(());
    }

    debug!(status = response.status, url, "Request failed");
    Err(RestError::HttpStatus {
        status: response.status,
        url: url.to_string(),
        body: response.body.clone(),
    })
}

/// Decode a successful body
///
/// An empty (or whitespace) body is [`RestError::EmptyResponse`]; a body that
/// carries `errors` or `error` is [`RestError::Api`].
pub fn decode_body(body: &str) -> RestResult<Value> {
    if body.trim().is_empty() {
        return Err(RestError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body)?;

    if let Some(errors) = ApiErrorDetail::from_body(&value) {
        return Err(RestError::Api { errors });
    }

    Ok(value)
}

/// Classify a response into decoded JSON or an error
pub fn classify(response: RawResponse, url: &str) -> RestResult<Value> {
    check_status(&response, url)?;
    decode_body(&response.body)
}

/// Classify a response where an empty body means success (DELETE)
pub fn classify_optional(response: RawResponse, url: &str) -> RestResult<Option<Value>> {
    check_status(&response, url)?;
    match decode_body(&response.body) {
        Ok(value) => Ok(Some(value)),
        Err(RestError::EmptyResponse) => Ok(None),
        Err(e) => Err(e),
    }
}
