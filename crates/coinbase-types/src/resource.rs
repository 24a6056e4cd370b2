//! Resource registry and envelope mapping
//!
//! Every object the API returns names its type in a `resource` field
//! (`"account"`, `"transaction"`, ...). The registry maps that tag onto a
//! constructor for the matching model. Tags the registry does not know are
//! passed through as [`Resource::Raw`] so that new API resource types do not
//! break older clients.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

use crate::envelope::Envelope;
use crate::models::*;
use crate::pagination::Page;

/// Builds a [`Resource`] from a decoded object
pub type Constructor = fn(Value) -> Result<Resource, serde_json::Error>;

/// A model the registry can produce
pub trait ApiResource: Into<Resource> + TryFrom<Resource, Error = Resource> {
    /// Registry tag (the `resource` field value)
    const RESOURCE: &'static str;
}

/// Decode a payload as `T`, which must carry `T`'s own tag
fn construct<T>(value: Value) -> Result<Resource, serde_json::Error>
where
    T: ApiResource + DeserializeOwned,
{
    match resource_tag(&value) {
        Some(tag) if tag == T::RESOURCE => serde_json::from_value::<T>(value).map(Into::into),
        found => Err(serde_json::Error::custom(format!(
            "expected resource {:?}, found {:?}",
            T::RESOURCE,
            found
        ))),
    }
}

macro_rules! resources {
    ($($tag:literal => $variant:ident),+ $(,)?) => {
        /// A mapped API object
        #[derive(Debug, Clone, PartialEq)]
        pub enum Resource {
            $(
                #[doc = concat!("`", $tag, "` resource")]
                $variant($variant),
            )+
            /// Payload with an unknown or missing `resource` tag, unchanged
            Raw(Value),
        }

        static REGISTRY: &[(&str, Constructor)] = &[
            $(($tag, construct::<$variant>),)+
        ];

        impl Resource {
            /// Registry tag of this resource, `None` for raw payloads
            pub fn kind(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant(_) => Some($tag),)+
                    Self::Raw(_) => None,
                }
            }

            /// Resource id, if the payload has one
            pub fn id(&self) -> Option<&str> {
                match self {
                    $(Self::$variant(inner) => Some(inner.id.as_str()),)+
                    Self::Raw(value) => value.get("id").and_then(Value::as_str),
                }
            }
        }

        $(
            impl ApiResource for $variant {
                const RESOURCE: &'static str = $tag;
            }

            impl From<$variant> for Resource {
                fn from(inner: $variant) -> Self {
                    Self::$variant(inner)
                }
            }

            impl TryFrom<Resource> for $variant {
                type Error = Resource;

                fn try_from(resource: Resource) -> Result<Self, Self::Error> {
                    match resource {
                        Resource::$variant(inner) => Ok(inner),
                        other => Err(other),
                    }
                }
            }
        )+
    };
}

resources! {
    "account" => Account,
    "address" => Address,
    "buy" => Buy,
    "checkout" => Checkout,
    "deposit" => Deposit,
    "merchant" => Merchant,
    "notification" => Notification,
    "order" => Order,
    "payment_method" => PaymentMethod,
    "sell" => Sell,
    "transaction" => Transaction,
    "user" => User,
    "withdrawal" => Withdrawal,
}

impl Resource {
    /// Check if this is an unmapped payload
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

/// Look up the constructor registered for a resource tag
pub fn constructor_for(tag: &str) -> Option<Constructor> {
    REGISTRY
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, constructor)| *constructor)
}

/// All resource tags known to the registry
pub fn registered_resources() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

fn resource_tag(value: &Value) -> Option<&str> {
    value.get("resource").and_then(Value::as_str)
}

/// Map a single `data` object onto its model
///
/// Unknown or missing tags return the object unchanged as [`Resource::Raw`].
/// A known tag whose payload does not fit the model is an error.
pub fn map_resource(data: Value) -> Result<Resource, serde_json::Error> {
    match resource_tag(&data).and_then(constructor_for) {
        Some(constructor) => constructor(data),
        None => Ok(Resource::Raw(data)),
    }
}

/// Map a `data` array onto models, preserving order
///
/// The constructor is chosen once from the first element's tag, and every
/// element must carry that same tag; a mixed list is an error. A list whose
/// first tag is unknown maps to raw items. An empty array maps to an empty
/// `Vec` without consulting the registry; a non-array payload maps to a
/// single item.
pub fn map_resources(data: Value) -> Result<Vec<Resource>, serde_json::Error> {
    let items = match data {
        Value::Array(items) => items,
        other => return map_resource(other).map(|resource| vec![resource]),
    };

    let Some(first) = items.first() else {
        return Ok(Vec::new());
    };

    match resource_tag(first).and_then(constructor_for) {
        Some(constructor) => items.into_iter().map(constructor).collect(),
        None => Ok(items.into_iter().map(Resource::Raw).collect()),
    }
}

/// Map a decoded single-object response
///
/// When `data` carries a registered tag the model is built from `data`.
/// Otherwise (unknown or missing tag, no `data` at all) the whole body is
/// returned as [`Resource::Raw`], so sibling fields such as `warnings` are
/// kept.
pub fn map_envelope(mut body: Value) -> Result<Resource, serde_json::Error> {
    let constructor = body
        .get("data")
        .and_then(resource_tag)
        .and_then(constructor_for);

    if let Some(constructor) = constructor {
        if let Some(data) = body.get_mut("data") {
            return constructor(data.take());
        }
    }

    Ok(Resource::Raw(body))
}

/// Map a decoded list response into a page
pub fn map_page(body: Value) -> Result<Page<Resource>, serde_json::Error> {
    let envelope: Envelope = serde_json::from_value(body)?;
    let items = map_resources(envelope.data)?;
    Ok(Page::new(items, envelope.pagination))
}
