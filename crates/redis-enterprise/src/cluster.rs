//! Cluster identity and cluster-wide stats

use redis_mgmt_core::Result;
use redis_mgmt_core::blocking;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EnterpriseClient;

/// Cluster configuration as reported by `GET /v1/cluster`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(flatten)]
    pub extra: Value,
}

impl EnterpriseClient {
    /// Fetch the cluster object.
    pub async fn cluster_info(&self) -> Result<ClusterInfo> {
        self.get("/v1/cluster").await
    }

    /// Blocking form of [`EnterpriseClient::cluster_info`].
    pub fn cluster_info_sync(&self) -> Result<ClusterInfo> {
        blocking::block_on(self.cluster_info())
    }

    /// Latest cluster-wide stats sample.
    ///
    /// The stats schema varies by cluster version, so the sample comes back
    /// as raw JSON.
    pub async fn cluster_stats(&self) -> Result<Value> {
        self.get_raw("/v1/cluster/stats/last").await
    }

    /// Blocking form of [`EnterpriseClient::cluster_stats`].
    pub fn cluster_stats_sync(&self) -> Result<Value> {
        blocking::block_on(self.cluster_stats())
    }
}
