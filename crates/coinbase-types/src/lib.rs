//! Shared types for the Coinbase App REST API v2
//!
//! This crate holds the data side of the SDK: the `{ data, pagination }`
//! envelope, typed resource models, the resource registry used to map
//! decoded payloads onto those models, and pagination requests.
//! It has no network or crypto dependencies and can be used independently.
//!
//! # Key Types
//!
//! - [`Resource`] - A mapped API object (`Account`, `Transaction`, ...) or raw JSON
//! - [`map_resource`], [`map_resources`] - Registry-driven mapping
//! - [`Envelope`], [`ApiErrorDetail`] - Response wrapper and error entries
//! - [`ListRequest`], [`ListOptions`], [`Page`], [`Pagination`] - Cursor pagination
//! - [`Money`] - Decimal amount with currency code

pub mod envelope;
pub mod models;
pub mod money;
pub mod pagination;
pub mod resource;

// Re-export commonly used types
pub use envelope::*;
pub use models::*;
pub use money::*;
pub use pagination::*;
pub use resource::*;

// Re-export rust_decimal for users
pub use rust_decimal::Decimal;
