//! Currency, price and time endpoints
//!
//! These return plain data rather than tagged resources, so the `data`
//! payload is handed back as JSON.

use serde_json::Value;
use tracing::instrument;

use crate::client::CoinbaseClient;
use crate::endpoints::segment;
use crate::error::{RestError, RestResult};

/// Which price to quote for a currency pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceKind {
    Buy,
    Sell,
    Spot,
}

impl PriceKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
            Self::Spot => "spot",
        }
    }
}

impl CoinbaseClient {
    /// List known fiat currencies
    #[instrument(skip(self))]
    pub async fn get_currencies(&self) -> RestResult<Value> {
        self.get_data("currencies", &[]).await
    }

    /// Exchange rates from `currency` (API default `USD` when `None`)
    #[instrument(skip(self))]
    pub async fn get_exchange_rates(&self, currency: Option<&str>) -> RestResult<Value> {
        let query: Vec<(&str, String)> = currency
            .map(|c| vec![("currency", c.to_string())])
            .unwrap_or_default();
        self.get_data("exchange-rates", &query).await
    }

    /// Price for a pair such as `"BTC-USD"`
    ///
    /// `date` (`YYYY-MM-DD`) selects a historic spot price and is only
    /// accepted for [`PriceKind::Spot`].
    #[instrument(skip(self))]
    pub async fn get_price(&self, pair: &str, kind: PriceKind, date: Option<&str>) -> RestResult<Value> {
        if pair.is_empty() {
            return Err(RestError::InvalidParameter("currency pair must not be empty".into()));
        }

        let query: Vec<(&str, String)> = match (kind, date) {
            (PriceKind::Spot, Some(date)) => vec![("date", date.to_string())],
            (_, Some(_)) => {
                return Err(RestError::InvalidParameter(
                    "date is only supported for spot prices".into(),
                ))
            }
            (_, None) => Vec::new(),
        };

        self.get_data(&format!("prices/{}/{}", segment(pair), kind.as_str()), &query)
            .await
    }

    /// Price to buy one unit of the base currency
    pub async fn get_buy_price(&self, pair: &str) -> RestResult<Value> {
        self.get_price(pair, PriceKind::Buy, None).await
    }

    /// Price to sell one unit of the base currency
    pub async fn get_sell_price(&self, pair: &str) -> RestResult<Value> {
        self.get_price(pair, PriceKind::Sell, None).await
    }

    /// Current spot price
    pub async fn get_spot_price(&self, pair: &str) -> RestResult<Value> {
        self.get_price(pair, PriceKind::Spot, None).await
    }

    /// Server time
    #[instrument(skip(self))]
    pub async fn get_time(&self) -> RestResult<Value> {
        self.get_data("time", &[]).await
    }
}
