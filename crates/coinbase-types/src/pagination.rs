//! Cursor pagination for list endpoints
//!
//! A list call is either a *fresh* query against a collection, optionally
//! narrowed with `starting_after` / `ending_before` / `limit` / `order`, or a
//! *follow* of the `next_uri` returned with a previous page. The two modes are
//! mutually exclusive: a follow request reuses the cursor verbatim and never
//! adds query parameters of its own.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path prefix carried by cursors returned from the API
const API_VERSION_PREFIX: &str = "/v2/";

/// Sort order of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first
    Asc,
    /// Newest first (API default)
    Desc,
}

impl SortOrder {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination metadata returned alongside list responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub ending_before: Option<String>,
    #[serde(default)]
    pub starting_after: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub order: Option<SortOrder>,
    #[serde(default)]
    pub previous_uri: Option<String>,
    /// Cursor for the next page, absent on the last page
    #[serde(default)]
    pub next_uri: Option<String>,
}

impl Pagination {
    /// Check if another page is available
    pub fn has_next(&self) -> bool {
        self.next_uri.as_deref().is_some_and(|uri| !uri.is_empty())
    }
}

/// Filters for a fresh list query
///
/// Only the options that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub starting_after: Option<String>,
    pub ending_before: Option<String>,
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
}

impl ListOptions {
    /// Create empty options (API defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Return results after this resource id
    pub fn starting_after(mut self, id: impl Into<String>) -> Self {
        self.starting_after = Some(id.into());
        self
    }

    /// Return results before this resource id
    pub fn ending_before(mut self, id: impl Into<String>) -> Self {
        self.ending_before = Some(id.into());
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort order
    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Query parameters for the options that are present, in a fixed order
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(starting_after) = &self.starting_after {
            params.push(("starting_after", starting_after.clone()));
        }
        if let Some(ending_before) = &self.ending_before {
            params.push(("ending_before", ending_before.clone()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }

        params
    }
}

/// A list request: follow a cursor or start a fresh query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    /// Follow a `next_uri` from a previous page
    Follow { next_uri: String },
    /// Query a collection path (e.g., "accounts", "accounts/{id}/transactions")
    Fresh {
        collection: String,
        options: ListOptions,
    },
}

impl ListRequest {
    /// Fresh query with API default options
    pub fn collection(collection: impl Into<String>) -> Self {
        Self::Fresh {
            collection: collection.into(),
            options: ListOptions::default(),
        }
    }

    /// Fresh query with explicit options
    pub fn with_options(collection: impl Into<String>, options: ListOptions) -> Self {
        Self::Fresh {
            collection: collection.into(),
            options,
        }
    }

    /// Follow a cursor returned by the API
    pub fn follow(next_uri: impl Into<String>) -> Self {
        Self::Follow {
            next_uri: next_uri.into(),
        }
    }

    /// Relative path and query parameters to issue
    ///
    /// Follow requests strip the first `/v2/` from the cursor and carry no
    /// parameters; fresh requests carry only the options that are set.
    pub fn to_path_and_query(&self) -> (String, Vec<(&'static str, String)>) {
        match self {
            Self::Follow { next_uri } => (next_uri.replacen(API_VERSION_PREFIX, "", 1), Vec::new()),
            Self::Fresh {
                collection,
                options,
            } => (collection.clone(), options.to_query()),
        }
    }
}

/// One page of a list response
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Items in API order
    pub items: Vec<T>,
    /// Cursor metadata, if the API returned any
    pub pagination: Option<Pagination>,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(items: Vec<T>, pagination: Option<Pagination>) -> Self {
        Self { items, pagination }
    }

    /// Request for the next page, if there is one
    pub fn next_request(&self) -> Option<ListRequest> {
        self.pagination
            .as_ref()
            .filter(|p| p.has_next())
            .and_then(|p| p.next_uri.clone())
            .map(ListRequest::follow)
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if this page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert every item, failing on the first error
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            items,
            pagination: self.pagination,
        })
    }
}
