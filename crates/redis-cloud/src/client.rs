//! Cloud client construction and the generic verb layer

use std::env;
use std::time::Duration;

use redis_mgmt_core::blocking;
use redis_mgmt_core::credentials::{self, Credentials};
use redis_mgmt_core::error::{ApiError, Result};
use redis_mgmt_core::request::PendingRequest;
use redis_mgmt_core::transport::{ClientConfig, RestClient};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Production Cloud API root used when no base URL is configured.
pub const DEFAULT_API_URL: &str = "https://api.redislabs.com/v1";

const USER_AGENT: &str = concat!("redis-cloud/", env!("CARGO_PKG_VERSION"));

/// Client for the Redis Cloud management REST API.
///
/// Cheap to clone and safe to share across tasks; nothing is mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct CloudClient {
    rest: RestClient,
}

impl CloudClient {
    /// Start building a client with explicit settings.
    pub fn builder() -> CloudClientBuilder {
        CloudClientBuilder::default()
    }

    /// Build a client from the environment.
    ///
    /// Credentials are resolved through the documented variable ladder (see
    /// [`Credentials::cloud_from_env`]); `REDIS_CLOUD_API_URL` overrides the
    /// production API root. Fails with [`ApiError::MissingCredentials`]
    /// before any request can be issued.
    pub fn from_env() -> Result<Self> {
        let resolved = Credentials::cloud_from_env()?;
        let base_url = env::var(credentials::CLOUD_API_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        debug!(base_url = %base_url, "building cloud client from environment");

        let mut config = ClientConfig::new(base_url);
        config.user_agent = Some(USER_AGENT.to_string());
        Ok(CloudClient {
            rest: RestClient::new(config, resolved)?,
        })
    }

    /// The base URL requests are joined against
    pub fn base_url(&self) -> &str {
        self.rest.base_url()
    }

    // ------------------------------------------------------------------
    // Typed verbs
    // ------------------------------------------------------------------

    /// GET `path` and decode the response into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.rest.execute(PendingRequest::get(path)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET `path` with query pairs appended in the given order.
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let request = PendingRequest::get(path).query_pairs(query.to_vec());
        let value = self.rest.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST `body` to `path` and decode the response into `T`.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let body = encode_body(body)?;
        let value = self
            .rest
            .execute(PendingRequest::post(path).body(body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// PUT `body` to `path` and decode the response into `T`.
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let body = encode_body(body)?;
        let value = self
            .rest
            .execute(PendingRequest::put(path).body(body))
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// DELETE `path` and decode the response into `T`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.rest.execute(PendingRequest::delete(path)).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// DELETE `path` with query pairs appended in the given order.
    pub async fn delete_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let request = PendingRequest::delete(path).query_pairs(query.to_vec());
        let value = self.rest.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Blocking form of [`CloudClient::get`].
    pub fn get_sync<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        blocking::block_on(self.get(path))
    }

    /// Blocking form of [`CloudClient::get_with_query`].
    pub fn get_with_query_sync<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        blocking::block_on(self.get_with_query(path, query))
    }

    /// Blocking form of [`CloudClient::post`].
    pub fn post_sync<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        blocking::block_on(self.post(path, body))
    }

    /// Blocking form of [`CloudClient::put`].
    pub fn put_sync<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        blocking::block_on(self.put(path, body))
    }

    /// Blocking form of [`CloudClient::delete`].
    pub fn delete_sync<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        blocking::block_on(self.delete(path))
    }

    /// Blocking form of [`CloudClient::delete_with_query`].
    pub fn delete_with_query_sync<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        blocking::block_on(self.delete_with_query(path, query))
    }

    // ------------------------------------------------------------------
    // Raw verbs
    // ------------------------------------------------------------------

    /// GET `path`, returning the decoded JSON untouched.
    pub async fn get_raw(&self, path: &str) -> Result<Value> {
        self.rest.execute(PendingRequest::get(path)).await
    }

    /// POST `body` to `path`, returning the decoded JSON untouched.
    pub async fn post_raw(&self, path: &str, body: Value) -> Result<Value> {
        self.rest.execute(PendingRequest::post(path).body(body)).await
    }

    /// PUT `body` to `path`, returning the decoded JSON untouched.
    pub async fn put_raw(&self, path: &str, body: Value) -> Result<Value> {
        self.rest.execute(PendingRequest::put(path).body(body)).await
    }

    /// DELETE `path`, returning the decoded JSON untouched.
    pub async fn delete_raw(&self, path: &str) -> Result<Value> {
        self.rest.execute(PendingRequest::delete(path)).await
    }

    /// Blocking form of [`CloudClient::get_raw`].
    pub fn get_raw_sync(&self, path: &str) -> Result<Value> {
        blocking::block_on(self.get_raw(path))
    }

    /// Blocking form of [`CloudClient::post_raw`].
    pub fn post_raw_sync(&self, path: &str, body: Value) -> Result<Value> {
        blocking::block_on(self.post_raw(path, body))
    }

    /// Blocking form of [`CloudClient::put_raw`].
    pub fn put_raw_sync(&self, path: &str, body: Value) -> Result<Value> {
        blocking::block_on(self.put_raw(path, body))
    }

    /// Blocking form of [`CloudClient::delete_raw`].
    pub fn delete_raw_sync(&self, path: &str) -> Result<Value> {
        blocking::block_on(self.delete_raw(path))
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Other(format!("cannot serialize request body: {e}")))
}

/// Builder for [`CloudClient`]
#[derive(Debug, Default)]
pub struct CloudClientBuilder {
    api_key: Option<String>,
    api_secret: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl CloudClientBuilder {
    /// Account API key (required).
    #[must_use]
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Account API secret (required).
    #[must_use]
    pub fn api_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    /// API root, defaults to [`DEFAULT_API_URL`].
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Per-request timeout, defaults to 30 seconds.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// User agent sent with every request.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Validate the settings and construct the client.
    pub fn build(self) -> Result<CloudClient> {
        let api_key = self
            .api_key
            .ok_or_else(|| ApiError::InvalidConfig("api_key is required".to_string()))?;
        let api_secret = self
            .api_secret
            .ok_or_else(|| ApiError::InvalidConfig("api_secret is required".to_string()))?;
        let resolved = Credentials::cloud(api_key, api_secret)?;

        let mut config = ClientConfig::new(
            self.base_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        );
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        config.user_agent = Some(self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()));

        Ok(CloudClient {
            rest: RestClient::new(config, resolved)?,
        })
    }
}
