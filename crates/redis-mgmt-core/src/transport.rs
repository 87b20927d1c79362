//! HTTP transport shared by both API surfaces
//!
//! One [`RestClient`] holds the configured `reqwest` client, the validated
//! base URL and the resolved credentials. Every operation of every surface
//! client, blocking or async, funnels through [`RestClient::execute`]: the
//! URL is joined, authentication applied, the response decoded, and every
//! failure mapped onto [`ApiError`].

use std::path::PathBuf;
use std::time::Duration;

use reqwest::{Certificate, Response};
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::auth;
use crate::credentials::Credentials;
use crate::error::{ApiError, Result};
use crate::request::PendingRequest;

/// Request timeout applied when the builder does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings shared by both surface clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub insecure_tls: bool,
    pub user_agent: Option<String>,
    pub ca_cert: Option<PathBuf>,
}

impl ClientConfig {
    /// Settings for `base_url` with the documented defaults everywhere else.
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            insecure_tls: false,
            user_agent: None,
            ca_cert: None,
        }
    }
}

/// Shared request pipeline: authenticate, send, decode
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    credentials: Credentials,
}

impl RestClient {
    /// Build the pipeline for `config` and `credentials`.
    ///
    /// The base URL must parse; the optional CA certificate must be readable
    /// PEM. All construction failures surface as [`ApiError::InvalidConfig`].
    pub fn new(config: ClientConfig, credentials: Credentials) -> Result<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            ApiError::InvalidConfig(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        let mut builder = reqwest::Client::builder().timeout(config.timeout);
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if config.insecure_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(path) = &config.ca_cert {
            let pem = std::fs::read(path).map_err(|e| {
                ApiError::InvalidConfig(format!(
                    "cannot read CA certificate {}: {e}",
                    path.display()
                ))
            })?;
            let certificate = Certificate::from_pem(&pem).map_err(|e| {
                ApiError::InvalidConfig(format!(
                    "cannot parse CA certificate {}: {e}",
                    path.display()
                ))
            })?;
            builder = builder.add_root_certificate(certificate);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::InvalidConfig(format!("cannot build HTTP client: {e}")))?;

        Ok(RestClient {
            http,
            base_url: config.base_url,
            credentials,
        })
    }

    /// The base URL requests are joined against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one request through the pipeline and decode the JSON response.
    pub async fn execute(&self, request: PendingRequest) -> Result<Value> {
        let url = join_url(&self.base_url, request.path());
        debug!(method = %request.method(), url = %url, "sending request");

        let mut builder = self.http.request(request.method().as_reqwest(), url.as_str());
        builder = auth::apply(builder, &self.credentials);
        if !request.query_params().is_empty() {
            builder = builder.query(request.query_params());
        }
        if let Some(body) = request.json_body() {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ApiError::Transport(flatten_error(&e)))?;
        decode_response(response).await
    }
}

async fn decode_response(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Transport(flatten_error(&e)))?;
    trace!(status = status.as_u16(), bytes = body.len(), "received response");

    if status.is_success() {
        if body.trim().is_empty() {
            // 204s and empty 200s decode to the unit result.
            return Ok(Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| ApiError::Decode(format!("invalid JSON in response: {e}")))
    } else {
        let detail = if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string()
        } else {
            body
        };
        debug!(status = status.as_u16(), "request failed");
        Err(ApiError::HttpStatus {
            code: status.as_u16(),
            detail,
        })
    }
}

/// Join `path` onto `base` with exactly one separating slash.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Flatten a reqwest error and its source chain into one line; reqwest's
/// `Display` alone omits the underlying connect/TLS cause.
fn flatten_error(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_normalizes_slashes() {
        let expected = "https://api.redislabs.com/v1/subscriptions";
        assert_eq!(
            join_url("https://api.redislabs.com/v1", "/subscriptions"),
            expected
        );
        assert_eq!(
            join_url("https://api.redislabs.com/v1/", "subscriptions"),
            expected
        );
        assert_eq!(
            join_url("https://api.redislabs.com/v1/", "/subscriptions"),
            expected
        );
        assert_eq!(
            join_url("https://api.redislabs.com/v1", "subscriptions"),
            expected
        );
    }

    #[test]
    fn test_join_url_keeps_inline_query() {
        assert_eq!(
            join_url("https://cluster:9443", "/v1/logs?order=desc"),
            "https://cluster:9443/v1/logs?order=desc"
        );
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("https://localhost:9443");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(!config.insecure_tls);
        assert!(config.user_agent.is_none());
        assert!(config.ca_cert.is_none());
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let credentials = Credentials::cloud("key", "secret").unwrap();
        let err = RestClient::new(ClientConfig::new("not a url"), credentials).unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
        assert!(err.to_string().contains("base URL"));
    }

    #[test]
    fn test_new_rejects_garbage_ca_certificate() {
        use std::io::Write;

        let mut pem = tempfile::NamedTempFile::new().unwrap();
        pem.write_all(b"definitely not pem").unwrap();

        let credentials = Credentials::enterprise("admin", "secret").unwrap();
        let mut config = ClientConfig::new("https://cluster.local:9443");
        config.ca_cert = Some(pem.path().to_path_buf());

        // Rejected at PEM parse or at client build; either way InvalidConfig.
        let err = RestClient::new(config, credentials).unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }

    #[test]
    fn test_new_rejects_missing_ca_certificate() {
        let credentials = Credentials::enterprise("admin", "secret").unwrap();
        let mut config = ClientConfig::new("https://cluster.local:9443");
        config.ca_cert = Some(PathBuf::from("/nonexistent/ca.pem"));

        let err = RestClient::new(config, credentials).unwrap_err();
        assert!(matches!(err, ApiError::InvalidConfig(_)));
    }
}
