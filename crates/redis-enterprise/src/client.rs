//! Enterprise client construction and the generic verb layer

use std::path::PathBuf;
use std::time::Duration;

use redis_mgmt_core::blocking;
use redis_mgmt_core::credentials::{Credentials, EnterpriseEnv};
use redis_mgmt_core::error::{ApiError, Result};
use redis_mgmt_core::request::PendingRequest;
use redis_mgmt_core::transport::{ClientConfig, RestClient};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// API root assumed when no base URL is configured. Clusters serve the
/// management API on port 9443 with a self-signed certificate out of the
/// box, so local use usually pairs this with [`EnterpriseClientBuilder::insecure`].
pub const DEFAULT_BASE_URL: &str = "https://localhost:9443";

const USER_AGENT: &str = concat!("redis-enterprise/", env!("CARGO_PKG_VERSION"));

/// Client for the Redis Enterprise cluster management REST API.
///
/// Cheap to clone and safe to share across tasks; nothing is mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct EnterpriseClient {
    rest: RestClient,
}

impl EnterpriseClient {
    /// Start building a client with explicit settings.
    pub fn builder() -> EnterpriseClientBuilder {
        EnterpriseClientBuilder::default()
    }

    /// Build a client from the environment.
    ///
    /// Requires `REDIS_ENTERPRISE_URL`, `REDIS_ENTERPRISE_USER` and
    /// `REDIS_ENTERPRISE_PASSWORD`; there is no implicit cluster address.
    /// `REDIS_ENTERPRISE_INSECURE=true` disables certificate verification
    /// and `REDIS_ENTERPRISE_CA_CERT` points at a PEM bundle to trust
    /// instead. Fails with [`ApiError::MissingCredentials`] before any
    /// request can be issued.
    pub fn from_env() -> Result<Self> {
        let env = EnterpriseEnv::from_env()?;
        debug!(base_url = %env.url, insecure = env.insecure, "building enterprise client from environment");

        let mut config = ClientConfig::new(env.url);
        config.insecure_tls = env.insecure;
        config.ca_cert = env.ca_cert;
        config.user_agent = Some(USER_AGENT.to_string());
        let resolved = Credentials::enterprise(env.username, env.password)?;
        Ok(EnterpriseClient {
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

    /// Blocking form of [`EnterpriseClient::get`].
    pub fn get_sync<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        blocking::block_on(self.get(path))
    }

    /// Blocking form of [`EnterpriseClient::get_with_query`].
    pub fn get_with_query_sync<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        blocking::block_on(self.get_with_query(path, query))
    }

    /// Blocking form of [`EnterpriseClient::post`].
    pub fn post_sync<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        blocking::block_on(self.post(path, body))
    }

    /// Blocking form of [`EnterpriseClient::put`].
    pub fn put_sync<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        blocking::block_on(self.put(path, body))
    }

    /// Blocking form of [`EnterpriseClient::delete`].
    pub fn delete_sync<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        blocking::block_on(self.delete(path))
    }

    /// Blocking form of [`EnterpriseClient::delete_with_query`].
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

    /// Blocking form of [`EnterpriseClient::get_raw`].
    pub fn get_raw_sync(&self, path: &str) -> Result<Value> {
        blocking::block_on(self.get_raw(path))
    }

    /// Blocking form of [`EnterpriseClient::post_raw`].
    pub fn post_raw_sync(&self, path: &str, body: Value) -> Result<Value> {
        blocking::block_on(self.post_raw(path, body))
    }

    /// Blocking form of [`EnterpriseClient::put_raw`].
    pub fn put_raw_sync(&self, path: &str, body: Value) -> Result<Value> {
        blocking::block_on(self.put_raw(path, body))
    }

    /// Blocking form of [`EnterpriseClient::delete_raw`].
    pub fn delete_raw_sync(&self, path: &str) -> Result<Value> {
        blocking::block_on(self.delete_raw(path))
    }
}

fn encode_body<B: Serialize>(body: &B) -> Result<Value> {
    serde_json::to_value(body)
        .map_err(|e| ApiError::Other(format!("cannot serialize request body: {e}")))
}

/// Builder for [`EnterpriseClient`]
#[derive(Debug, Default)]
pub struct EnterpriseClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    insecure: bool,
    ca_cert: Option<PathBuf>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl EnterpriseClientBuilder {
    /// Cluster API root, defaults to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Cluster username (required).
    #[must_use]
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Cluster password (required).
    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Skip TLS certificate verification. Self-signed cluster certificates
    /// need either this or [`EnterpriseClientBuilder::ca_cert`].
    #[must_use]
    pub fn insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    /// Trust the CA certificates in this PEM bundle.
    #[must_use]
    pub fn ca_cert(mut self, ca_cert: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(ca_cert.into());
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
    pub fn build(self) -> Result<EnterpriseClient> {
        let username = self
            .username
            .ok_or_else(|| ApiError::InvalidConfig("username is required".to_string()))?;
        let password = self
            .password
            .ok_or_else(|| ApiError::InvalidConfig("password is required".to_string()))?;
        let resolved = Credentials::enterprise(username, password)?;

        let mut config = ClientConfig::new(
            self.base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        );
        config.insecure_tls = self.insecure;
        config.ca_cert = self.ca_cert;
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        config.user_agent = Some(self.user_agent.unwrap_or_else(|| USER_AGENT.to_string()));

        Ok(EnterpriseClient {
            rest: RestClient::new(config, resolved)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_applies_default_base_url() {
        let client = EnterpriseClient::builder()
            .username("admin@redis.local")
            .password("test-password")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_requires_username_and_password() {
        let err = EnterpriseClient::builder()
            .password("test-password")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
        assert!(err.to_string().contains("username"));

        let err = EnterpriseClient::builder()
            .username("admin@redis.local")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("password"));
    }

    #[test]
    fn test_builder_rejects_empty_credentials() {
        let err = EnterpriseClient::builder()
            .username("admin@redis.local")
            .password("")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let err = EnterpriseClient::builder()
            .base_url("not a url")
            .username("admin@redis.local")
            .password("test-password")
            .build()
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_accepts_tls_overrides() {
        let client = EnterpriseClient::builder()
            .base_url("https://cluster.example.com:9443")
            .username("admin@redis.local")
            .password("test-password")
            .insecure(true)
            .timeout(Duration::from_secs(5))
            .user_agent("custom-agent/1.0")
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://cluster.example.com:9443");
    }
}
