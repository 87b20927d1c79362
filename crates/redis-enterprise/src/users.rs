//! Cluster user accounts

use redis_mgmt_core::Result;
use redis_mgmt_core::blocking;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EnterpriseClient;

/// Cluster user account. Passwords never appear in API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Value,
}

impl EnterpriseClient {
    /// List every user account on the cluster.
    pub async fn users(&self) -> Result<Vec<User>> {
        self.get("/v1/users").await
    }

    /// Blocking form of [`EnterpriseClient::users`].
    pub fn users_sync(&self) -> Result<Vec<User>> {
        blocking::block_on(self.users())
    }

    /// Fetch one user by uid.
    pub async fn user(&self, uid: u32) -> Result<User> {
        self.get(&format!("/v1/users/{uid}")).await
    }

    /// Blocking form of [`EnterpriseClient::user`].
    pub fn user_sync(&self, uid: u32) -> Result<User> {
        blocking::block_on(self.user(uid))
    }
}
