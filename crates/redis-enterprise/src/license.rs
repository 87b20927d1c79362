//! Cluster license inspection

use redis_mgmt_core::Result;
use redis_mgmt_core::blocking;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EnterpriseClient;

/// License state as reported by `GET /v1/license`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub expired: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shards_limit: Option<u64>,
    #[serde(flatten)]
    pub extra: Value,
}

impl EnterpriseClient {
    /// Fetch the cluster license.
    pub async fn license(&self) -> Result<License> {
        self.get("/v1/license").await
    }

    /// Blocking form of [`EnterpriseClient::license`].
    pub fn license_sync(&self) -> Result<License> {
        blocking::block_on(self.license())
    }
}
