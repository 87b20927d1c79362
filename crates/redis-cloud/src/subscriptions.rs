//! Subscription operations
//!
//! Paths are rooted at `/subscriptions`. Responses are returned as decoded
//! JSON: the Cloud API wraps collections in account-level envelopes
//! (`{"accountId": ..., "subscriptions": [...]}`), and those envelopes are
//! passed through untouched.

use redis_mgmt_core::blocking;
use redis_mgmt_core::error::Result;
use serde_json::Value;

use crate::CloudClient;

impl CloudClient {
    /// List all subscriptions in the account.
    pub async fn subscriptions(&self) -> Result<Value> {
        self.get_raw("/subscriptions").await
    }

    /// Blocking form of [`CloudClient::subscriptions`].
    pub fn subscriptions_sync(&self) -> Result<Value> {
        blocking::block_on(self.subscriptions())
    }

    /// Fetch one subscription.
    pub async fn subscription(&self, subscription_id: i32) -> Result<Value> {
        self.get_raw(&format!("/subscriptions/{subscription_id}"))
            .await
    }

    /// Blocking form of [`CloudClient::subscription`].
    pub fn subscription_sync(&self, subscription_id: i32) -> Result<Value> {
        blocking::block_on(self.subscription(subscription_id))
    }
}
