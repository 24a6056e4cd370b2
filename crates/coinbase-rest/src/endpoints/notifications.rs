//! Notification endpoints

use coinbase_types::{ListOptions, ListRequest, Notification, Page};
use tracing::instrument;

use crate::client::CoinbaseClient;
use crate::endpoints::segment;
use crate::error::RestResult;

impl CoinbaseClient {
    /// List notifications
    #[instrument(skip(self))]
    pub async fn get_notifications(&self, options: ListOptions) -> RestResult<Page<Notification>> {
        self.get_page_of(&ListRequest::with_options("notifications", options))
            .await
    }

    /// Get a notification by id
    #[instrument(skip(self))]
    pub async fn get_notification(&self, notification_id: &str) -> RestResult<Notification> {
        self.get_one(&format!("notifications/{}", segment(notification_id))).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::config::ClientConfig;
    use crate::transport::MockTransport;

    use super::*;

    #[tokio::test]
    async fn test_get_notification() {
        let transport = Arc::new(MockTransport::new());
        let client = CoinbaseClient::with_transport(ClientConfig::with_access_token("tok"), transport.clone()).unwrap();
        transport.push_json(&json!({
            "data": {
                "resource": "notification",
                "id": "6bf0ca21",
                "type": "wallet:buys:completed",
                "delivery_attempts": 0,
                "account": {"id": "8d5f086c", "resource": "account", "resource_path": "/v2/accounts/8d5f086c"}
            }
        }));

        let notification = client.get_notification("6bf0ca21").await.unwrap();
        assert_eq!(notification.notification_type.as_deref(), Some("wallet:buys:completed"));
        assert_eq!(notification.account.map(|a| a.id), Some("8d5f086c".to_string()));
        assert_eq!(
            transport.last_request().unwrap().url,
            "https://api.coinbase.com/v2/notifications/6bf0ca21?access_token=tok"
        );
    }
}
