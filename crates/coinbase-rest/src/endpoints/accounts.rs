//! Account endpoints
//!
//! Collection-level calls live on [`CoinbaseClient`]; calls scoped to one
//! account go through [`AccountEndpoints`], obtained with
//! [`CoinbaseClient::account`].

use coinbase_types::{
    Account, Address, Buy, Deposit, ListOptions, ListRequest, Page, Sell, Transaction, Withdrawal,
};
use serde_json::json;
use tracing::instrument;

use crate::client::{CoinbaseClient, HttpVerbs};
use crate::endpoints::segment;
use crate::error::{RestError, RestResult};

impl CoinbaseClient {
    /// Get account endpoints for one account
    pub fn account(&self, account_id: impl Into<String>) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self, account_id)
    }

    /// List accounts
    #[instrument(skip(self))]
    pub async fn get_accounts(&self, options: ListOptions) -> RestResult<Page<Account>> {
        self.get_page_of(&ListRequest::with_options("accounts", options)).await
    }

    /// Get an account by id
    #[instrument(skip(self))]
    pub async fn get_account(&self, account_id: &str) -> RestResult<Account> {
        self.account(account_id).get().await
    }

    /// Create a new wallet
    #[instrument(skip(self))]
    pub async fn create_account(&self, name: &str) -> RestResult<Account> {
        if name.is_empty() {
            return Err(RestError::InvalidParameter("account name must not be empty".into()));
        }
        self.post_one("accounts", Some(json!({ "name": name }))).await
    }
}

/// Endpoints scoped to a single account
pub struct AccountEndpoints<'a> {
    client: &'a CoinbaseClient,
    account_id: String,
}

impl<'a> AccountEndpoints<'a> {
    pub fn new(client: &'a CoinbaseClient, account_id: impl Into<String>) -> Self {
        Self {
            client,
            account_id: account_id.into(),
        }
    }

    /// Account id these endpoints are scoped to
    pub fn id(&self) -> &str {
        &self.account_id
    }

    fn path(&self, suffix: &str) -> String {
        if suffix.is_empty() {
            format!("accounts/{}", segment(&self.account_id))
        } else {
            format!("accounts/{}/{}", segment(&self.account_id), suffix)
        }
    }

    fn list(&self, collection: &str, options: ListOptions) -> ListRequest {
        ListRequest::with_options(self.path(collection), options)
    }

    /// Get the account itself
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get(&self) -> RestResult<Account> {
        self.client.get_one(&self.path("")).await
    }

    /// Rename the account
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn update(&self, name: &str) -> RestResult<Account> {
        self.client
            .put_one(&self.path(""), Some(json!({ "name": name })))
            .await
    }

    /// Make this the primary account for its currency
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn set_primary(&self) -> RestResult<Account> {
        self.client.post_one(&self.path("primary"), None).await
    }

    /// Delete the account
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn delete(&self) -> RestResult<()> {
        self.client.delete_http(&self.path("")).await?;
        Ok(())
    }

    // ========================================================================
    // Addresses
    // ========================================================================

    /// List receive addresses
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_addresses(&self, options: ListOptions) -> RestResult<Page<Address>> {
        self.client.get_page_of(&self.list("addresses", options)).await
    }

    /// Get one receive address
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_address(&self, address_id: &str) -> RestResult<Address> {
        self.client
            .get_one(&self.path(&format!("addresses/{}", segment(address_id))))
            .await
    }

    /// List transactions sent to an address
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_address_transactions(
        &self,
        address_id: &str,
        options: ListOptions,
    ) -> RestResult<Page<Transaction>> {
        let collection = format!("addresses/{}/transactions", segment(address_id));
        self.client.get_page_of(&self.list(&collection, options)).await
    }

    /// Create a new receive address
    ///
    /// # Arguments
    /// * `name` - Optional label for the address
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn create_address(&self, name: Option<&str>) -> RestResult<Address> {
        let body = name.map(|name| json!({ "name": name }));
        self.client.post_one(&self.path("addresses"), body).await
    }

    // ========================================================================
    // Transactions
    // ========================================================================

    /// List transactions
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_transactions(&self, options: ListOptions) -> RestResult<Page<Transaction>> {
        self.client.get_page_of(&self.list("transactions", options)).await
    }

    /// Get one transaction
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_transaction(&self, transaction_id: &str) -> RestResult<Transaction> {
        self.client
            .get_one(&self.path(&format!("transactions/{}", segment(transaction_id))))
            .await
    }

    // ========================================================================
    // Buys, sells, deposits, withdrawals
    // ========================================================================

    /// List buys
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_buys(&self, options: ListOptions) -> RestResult<Page<Buy>> {
        self.client.get_page_of(&self.list("buys", options)).await
    }

    /// Get one buy
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_buy(&self, buy_id: &str) -> RestResult<Buy> {
        self.client.get_one(&self.path(&format!("buys/{}", segment(buy_id)))).await
    }

    /// List sells
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_sells(&self, options: ListOptions) -> RestResult<Page<Sell>> {
        self.client.get_page_of(&self.list("sells", options)).await
    }

    /// Get one sell
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_sell(&self, sell_id: &str) -> RestResult<Sell> {
        self.client.get_one(&self.path(&format!("sells/{}", segment(sell_id)))).await
    }

    /// List deposits
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_deposits(&self, options: ListOptions) -> RestResult<Page<Deposit>> {
        self.client.get_page_of(&self.list("deposits", options)).await
    }

    /// Get one deposit
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_deposit(&self, deposit_id: &str) -> RestResult<Deposit> {
        self.client
            .get_one(&self.path(&format!("deposits/{}", segment(deposit_id))))
            .await
    }

    /// List withdrawals
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_withdrawals(&self, options: ListOptions) -> RestResult<Page<Withdrawal>> {
        self.client.get_page_of(&self.list("withdrawals", options)).await
    }

    /// Get one withdrawal
    #[instrument(skip(self), fields(account = %self.account_id))]
    pub async fn get_withdrawal(&self, withdrawal_id: &str) -> RestResult<Withdrawal> {
        self.client
            .get_one(&self.path(&format!("withdrawals/{}", segment(withdrawal_id))))
            .await
    }
}
