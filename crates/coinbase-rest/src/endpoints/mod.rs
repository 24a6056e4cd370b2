//! API endpoint implementations

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub mod accounts;
pub mod data;
pub mod notifications;
pub mod oauth;
pub mod payment_methods;
pub mod users;

pub use accounts::AccountEndpoints;
pub use data::PriceKind;
pub use oauth::OAuthToken;

/// Everything but unreserved characters is escaped inside a path segment
static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Escape a caller-supplied id for use as one path segment
pub(crate) fn segment(value: &str) -> Cow<'_, str> {
    utf8_percent_encode(value, &PATH_SEGMENT_ENCODE_SET).into()
}
