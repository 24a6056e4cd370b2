//! Monetary amounts with decimal precision

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of a given currency
///
/// Coinbase sends amounts as JSON strings (`"12.50"`); they are parsed
/// straight into [`Decimal`] so no precision is lost through `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in units of `currency`
    pub amount: Decimal,
    /// Currency code (e.g., "BTC", "USD")
    pub currency: String,
}

impl Money {
    /// Create a new amount
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Check if this amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
