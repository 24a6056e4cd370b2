//! Resource models returned by the v2 API
//!
//! Each model names the fields the SDK relies on and keeps everything else
//! in `extra`, so fields added by the API are never dropped on the floor.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::money::Money;

/// Reference to another resource (`{"id", "resource", "resource_path"}`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub resource_path: Option<String>,
}

/// A wallet or vault holding one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub primary: bool,
    /// "wallet", "fiat", "vault"
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    /// Currency code or currency object, depending on API version
    #[serde(default)]
    pub currency: Option<Value>,
    #[serde(default)]
    pub balance: Option<Money>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Account {
    /// Currency code, whichever shape the API used
    pub fn currency_code(&self) -> Option<&str> {
        match self.currency.as_ref()? {
            Value::String(code) => Some(code),
            Value::Object(currency) => currency.get("code").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// A receive address of an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A ledger entry on an account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    /// "send", "buy", "sell", "transfer", ...
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub native_amount: Option<Money>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Buys, sells, deposits and withdrawals share one shape on the wire.
macro_rules! transfer_model {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        pub struct $name {
            pub id: String,
            #[serde(default)]
            pub resource: String,
            #[serde(default)]
            pub resource_path: Option<String>,
            #[serde(default)]
            pub status: Option<String>,
            #[serde(default)]
            pub payment_method: Option<ResourceRef>,
            #[serde(default)]
            pub transaction: Option<ResourceRef>,
            #[serde(default)]
            pub amount: Option<Money>,
            #[serde(default)]
            pub total: Option<Money>,
            #[serde(default)]
            pub subtotal: Option<Money>,
            #[serde(default)]
            pub fee: Option<Money>,
            #[serde(default)]
            pub committed: Option<bool>,
            #[serde(default)]
            pub payout_at: Option<DateTime<Utc>>,
            #[serde(default)]
            pub created_at: Option<DateTime<Utc>>,
            #[serde(default)]
            pub updated_at: Option<DateTime<Utc>>,
            #[serde(flatten)]
            pub extra: Map<String, Value>,
        }
    };
}

transfer_model!(
    /// Purchase of crypto with a payment method
    Buy
);
transfer_model!(
    /// Sale of crypto into a payment method
    Sell
);
transfer_model!(
    /// Fiat deposit from a payment method
    Deposit
);
transfer_model!(
    /// Fiat withdrawal to a payment method
    Withdrawal
);

/// Merchant checkout (payment button)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkout {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Public merchant profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Webhook notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(rename = "type", default)]
    pub notification_type: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub user: Option<ResourceRef>,
    #[serde(default)]
    pub account: Option<ResourceRef>,
    #[serde(default)]
    pub delivery_attempts: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Merchant order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub payout_amount: Option<Money>,
    #[serde(default)]
    pub receipt_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Bank account, card or other funding source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(rename = "type", default)]
    pub method_type: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub primary_buy: bool,
    #[serde(default)]
    pub primary_sell: bool,
    #[serde(default)]
    pub allow_buy: bool,
    #[serde(default)]
    pub allow_sell: bool,
    #[serde(default)]
    pub allow_deposit: bool,
    #[serde(default)]
    pub allow_withdraw: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Coinbase user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub resource: String,
    #[serde(default)]
    pub resource_path: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub profile_location: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub native_currency: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_account_keeps_unknown_fields() {
        let account: Account = serde_json::from_value(json!({
            "id": "2bbf394c",
            "resource": "account",
            "resource_path": "/v2/accounts/2bbf394c",
            "name": "BTC Wallet",
            "primary": true,
            "type": "wallet",
            "currency": {"code": "BTC", "name": "Bitcoin"},
            "balance": {"amount": "0.5", "currency": "BTC"},
            "created_at": "2015-01-31T20:49:02Z",
            "allow_deposits": true
        }))
        .unwrap();

        assert_eq!(account.name.as_deref(), Some("BTC Wallet"));
        assert_eq!(account.account_type.as_deref(), Some("wallet"));
        assert_eq!(account.currency_code(), Some("BTC"));
        assert_eq!(account.balance.unwrap().amount, dec!(0.5));
        assert_eq!(account.extra.get("allow_deposits"), Some(&json!(true)));
    }

    #[test]
    fn test_account_currency_as_string() {
        let account: Account =
            serde_json::from_value(json!({"id": "1", "currency": "ETH"})).unwrap();
        assert_eq!(account.currency_code(), Some("ETH"));
        assert!(!account.primary);
    }

    #[test]
    fn test_transfer_model() {
        let buy: Buy = serde_json::from_value(json!({
            "id": "67e0eaec",
            "resource": "buy",
            "status": "completed",
            "payment_method": {"id": "83562370", "resource": "payment_method"},
            "amount": {"amount": "10.0", "currency": "BTC"},
            "fee": {"amount": "1.00", "currency": "USD"},
            "committed": true
        }))
        .unwrap();

        assert_eq!(buy.status.as_deref(), Some("completed"));
        assert_eq!(buy.payment_method.unwrap().id, "83562370");
        assert_eq!(buy.fee.unwrap().amount, dec!(1.00));
        assert_eq!(buy.committed, Some(true));
    }

    #[test]
    fn test_model_requires_id() {
        let result: Result<User, _> = serde_json::from_value(json!({"resource": "user"}));
        assert!(result.is_err());
    }
}
