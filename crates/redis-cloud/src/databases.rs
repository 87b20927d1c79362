//! Database operations, nested under their subscription

use redis_mgmt_core::blocking;
use redis_mgmt_core::error::Result;
use serde_json::Value;

use crate::CloudClient;

impl CloudClient {
    /// List databases in a subscription.
    ///
    /// `offset` and `limit` are passed through as pagination query
    /// parameters when given; the API's paging envelope is returned
    /// untouched.
    pub async fn databases(
        &self,
        subscription_id: i32,
        offset: Option<i32>,
        limit: Option<i32>,
    ) -> Result<Value> {
        let path = format!("/subscriptions/{subscription_id}/databases");
        let mut query: Vec<(String, String)> = Vec::new();
        if let Some(offset) = offset {
            query.push(("offset".to_string(), offset.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        if query.is_empty() {
            self.get_raw(&path).await
        } else {
            self.get_with_query(&path, &query).await
        }
    }

    /// Blocking form of [`CloudClient::databases`].
    pub fn databases_sync(
        &self,
        subscription_id: i32,
        offset: Option<i32>,
        limit: Option<i32>,
    ) -> Result<Value> {
        blocking::block_on(self.databases(subscription_id, offset, limit))
    }

    /// Fetch one database.
    pub async fn database(&self, subscription_id: i32, database_id: i32) -> Result<Value> {
        self.get_raw(&format!(
            "/subscriptions/{subscription_id}/databases/{database_id}"
        ))
        .await
    }

    /// Blocking form of [`CloudClient::database`].
    pub fn database_sync(&self, subscription_id: i32, database_id: i32) -> Result<Value> {
        blocking::block_on(self.database(subscription_id, database_id))
    }
}
