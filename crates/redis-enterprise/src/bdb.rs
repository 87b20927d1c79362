//! Database (BDB) inventory and per-database stats

use redis_mgmt_core::Result;
use redis_mgmt_core::blocking;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EnterpriseClient;

/// Database configuration as reported by the cluster.
///
/// The full BDB object runs to a few hundred fields; the common ones are
/// typed here and the rest stay reachable through `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub uid: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replication: Option<bool>,
    #[serde(flatten)]
    pub extra: Value,
}

impl EnterpriseClient {
    /// List every database on the cluster.
    pub async fn databases(&self) -> Result<Vec<Database>> {
        self.get("/v1/bdbs").await
    }

    /// Blocking form of [`EnterpriseClient::databases`].
    pub fn databases_sync(&self) -> Result<Vec<Database>> {
        blocking::block_on(self.databases())
    }

    /// Fetch one database by uid.
    pub async fn database(&self, uid: u32) -> Result<Database> {
        self.get(&format!("/v1/bdbs/{uid}")).await
    }

    /// Blocking form of [`EnterpriseClient::database`].
    pub fn database_sync(&self, uid: u32) -> Result<Database> {
        blocking::block_on(self.database(uid))
    }

    /// Latest stats sample for one database, as raw JSON.
    pub async fn database_stats(&self, uid: u32) -> Result<Value> {
        self.get_raw(&format!("/v1/bdbs/{uid}/stats/last")).await
    }

    /// Blocking form of [`EnterpriseClient::database_stats`].
    pub fn database_stats_sync(&self, uid: u32) -> Result<Value> {
        blocking::block_on(self.database_stats(uid))
    }
}
