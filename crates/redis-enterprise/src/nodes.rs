//! Cluster node inventory and per-node stats

use redis_mgmt_core::Result;
use redis_mgmt_core::blocking;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EnterpriseClient;

/// Node membership record as reported by the cluster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub uid: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_memory: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Value,
}

impl EnterpriseClient {
    /// List every node in the cluster.
    pub async fn nodes(&self) -> Result<Vec<Node>> {
        self.get("/v1/nodes").await
    }

    /// Blocking form of [`EnterpriseClient::nodes`].
    pub fn nodes_sync(&self) -> Result<Vec<Node>> {
        blocking::block_on(self.nodes())
    }

    /// Fetch one node by uid.
    pub async fn node(&self, uid: u32) -> Result<Node> {
        self.get(&format!("/v1/nodes/{uid}")).await
    }

    /// Blocking form of [`EnterpriseClient::node`].
    pub fn node_sync(&self, uid: u32) -> Result<Node> {
        blocking::block_on(self.node(uid))
    }

    /// Latest stats sample for one node, as raw JSON.
    pub async fn node_stats(&self, uid: u32) -> Result<Value> {
        self.get_raw(&format!("/v1/nodes/{uid}/stats/last")).await
    }

    /// Blocking form of [`EnterpriseClient::node_stats`].
    pub fn node_stats_sync(&self, uid: u32) -> Result<Value> {
        blocking::block_on(self.node_stats(uid))
    }
}
