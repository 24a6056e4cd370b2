//! User endpoints

use coinbase_types::User;
use tracing::instrument;

use crate::client::CoinbaseClient;
use crate::endpoints::segment;
use crate::error::RestResult;

impl CoinbaseClient {
    /// Get the user the credentials belong to
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> RestResult<User> {
        self.get_one("user").await
    }

    /// Get a user by id (public profile fields only)
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: &str) -> RestResult<User> {
        self.get_one(&format!("users/{}", segment(user_id))).await
    }

    /// Get the permissions granted to the current credentials
    #[instrument(skip(self))]
    pub async fn get_auth_info(&self) -> RestResult<serde_json::Value> {
        self.get_data("user/auth", &[]).await
    }

    /// Update the current user's profile
    ///
    /// # Arguments
    /// * `changes` - Fields to change (e.g., `{"name": "...", "native_currency": "EUR"}`)
    #[instrument(skip(self, changes))]
    pub async fn update_current_user(&self, changes: serde_json::Value) -> RestResult<User> {
        self.put_one("user", Some(changes)).await
    }
}
