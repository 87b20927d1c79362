//! Cluster event log retrieval

use redis_mgmt_core::blocking;
use redis_mgmt_core::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::EnterpriseClient;

/// One cluster event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the event happened
    pub time: String,

    /// Event type; it determines which additional fields are present
    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(flatten)]
    pub extra: Value,
}

/// Filters for [`EnterpriseClient::logs`].
///
/// All fields are optional; unset fields are left out of the query string.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LogsQuery {
    /// Only events at or after this time (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stime: Option<String>,
    /// Only events before this time (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub etime: Option<String>,
    /// `asc` or `desc`, oldest first by default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

impl EnterpriseClient {
    /// Fetch cluster event logs, newest-to-oldest ordering and paging
    /// controlled by `query`.
    pub async fn logs(&self, query: Option<LogsQuery>) -> Result<Vec<LogEntry>> {
        self.get(&logs_path(query)?).await
    }

    /// Blocking form of [`EnterpriseClient::logs`].
    pub fn logs_sync(&self, query: Option<LogsQuery>) -> Result<Vec<LogEntry>> {
        blocking::block_on(self.logs(query))
    }
}

fn logs_path(query: Option<LogsQuery>) -> Result<String> {
    let Some(query) = query else {
        return Ok("/v1/logs".to_string());
    };
    let encoded = serde_urlencoded::to_string(&query)
        .map_err(|e| ApiError::Other(format!("cannot encode log query: {e}")))?;
    if encoded.is_empty() {
        Ok("/v1/logs".to_string())
    } else {
        Ok(format!("/v1/logs?{encoded}"))
    }
}
