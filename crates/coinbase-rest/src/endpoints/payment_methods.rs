//! Payment method endpoints

use coinbase_types::{ListOptions, ListRequest, Page, PaymentMethod};
use tracing::instrument;

use crate::client::CoinbaseClient;
use crate::endpoints::segment;
use crate::error::RestResult;

impl CoinbaseClient {
    /// List linked payment methods
    #[instrument(skip(self))]
    pub async fn get_payment_methods(&self, options: ListOptions) -> RestResult<Page<PaymentMethod>> {
        self.get_page_of(&ListRequest::with_options("payment-methods", options))
            .await
    }

    /// Get a payment method by id
    #[instrument(skip(self))]
    pub async fn get_payment_method(&self, payment_method_id: &str) -> RestResult<PaymentMethod> {
        self.get_one(&format!("payment-methods/{}", segment(payment_method_id))).await
    }
}
