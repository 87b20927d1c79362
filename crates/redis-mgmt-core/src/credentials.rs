//! Credential resolution for both deployment surfaces
//!
//! Explicit constructors validate caller-supplied values; the `from_env`
//! constructors implement the documented environment variable lookups,
//! including the legacy alias names the Cloud surface has accumulated.
//! Resolution happens once, at client construction: a client that exists
//! always holds usable credentials.

use std::env;
use std::fmt;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{ApiError, Result};

/// Environment variables tried, in order, for the Cloud API key.
pub const CLOUD_API_KEY_VARS: &[&str] = &["REDIS_CLOUD_API_KEY", "REDIS_CLOUD_ACCOUNT_KEY"];

/// Environment variables tried, in order, for the Cloud API secret.
pub const CLOUD_API_SECRET_VARS: &[&str] = &[
    "REDIS_CLOUD_API_SECRET",
    "REDIS_CLOUD_SECRET_KEY",
    "REDIS_CLOUD_USER_KEY",
];

/// Optional override for the Cloud API root.
pub const CLOUD_API_URL_VAR: &str = "REDIS_CLOUD_API_URL";

/// Cluster endpoint, required by [`EnterpriseEnv::from_env`].
pub const ENTERPRISE_URL_VAR: &str = "REDIS_ENTERPRISE_URL";
/// Cluster username, required by [`EnterpriseEnv::from_env`].
pub const ENTERPRISE_USER_VAR: &str = "REDIS_ENTERPRISE_USER";
/// Cluster password, required by [`EnterpriseEnv::from_env`].
pub const ENTERPRISE_PASSWORD_VAR: &str = "REDIS_ENTERPRISE_PASSWORD";
/// Optional flag disabling TLS certificate verification ("true" or "1").
pub const ENTERPRISE_INSECURE_VAR: &str = "REDIS_ENTERPRISE_INSECURE";
/// Optional path to a CA certificate bundle in PEM format.
pub const ENTERPRISE_CA_CERT_VAR: &str = "REDIS_ENTERPRISE_CA_CERT";

/// Authentication material for one deployment surface
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Key/secret pair for the Redis Cloud REST API
    Cloud { api_key: String, api_secret: String },
    /// Username/password pair for a Redis Enterprise cluster
    Enterprise { username: String, password: String },
}

impl Credentials {
    /// Build Cloud credentials from explicit values.
    ///
    /// Empty or whitespace-only values are rejected with
    /// [`ApiError::InvalidConfig`].
    pub fn cloud(api_key: impl Into<String>, api_secret: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_key.trim().is_empty() {
            return Err(ApiError::InvalidConfig(
                "API key must not be empty".to_string(),
            ));
        }
        if api_secret.trim().is_empty() {
            return Err(ApiError::InvalidConfig(
                "API secret must not be empty".to_string(),
            ));
        }
        Ok(Credentials::Cloud {
            api_key,
            api_secret,
        })
    }

    /// Build Enterprise credentials from explicit values.
    pub fn enterprise(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        if username.trim().is_empty() {
            return Err(ApiError::InvalidConfig(
                "username must not be empty".to_string(),
            ));
        }
        if password.trim().is_empty() {
            return Err(ApiError::InvalidConfig(
                "password must not be empty".to_string(),
            ));
        }
        Ok(Credentials::Enterprise { username, password })
    }

    /// Resolve Cloud credentials from the environment.
    ///
    /// The key ladder ([`CLOUD_API_KEY_VARS`]) is walked first and
    /// short-circuits on the first hit; only then is the secret ladder
    /// ([`CLOUD_API_SECRET_VARS`]) consulted. Variables that are set but
    /// empty count as absent.
    pub fn cloud_from_env() -> Result<Self> {
        let api_key = first_set(CLOUD_API_KEY_VARS).ok_or_else(|| {
            ApiError::MissingCredentials(format!(
                "API key not found (set one of {})",
                CLOUD_API_KEY_VARS.join(", ")
            ))
        })?;
        let api_secret = first_set(CLOUD_API_SECRET_VARS).ok_or_else(|| {
            ApiError::MissingCredentials(format!(
                "API secret not found (set one of {})",
                CLOUD_API_SECRET_VARS.join(", ")
            ))
        })?;
        debug!("resolved cloud credentials from environment");
        Ok(Credentials::Cloud {
            api_key,
            api_secret,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Cloud { api_key, .. } => f
                .debug_struct("Cloud")
                .field("api_key", api_key)
                .field("api_secret", &"<REDACTED>")
                .finish(),
            Credentials::Enterprise { username, .. } => f
                .debug_struct("Enterprise")
                .field("username", username)
                .field("password", &"<REDACTED>")
                .finish(),
        }
    }
}

/// Enterprise connection settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterpriseEnv {
    pub url: String,
    pub username: String,
    pub password: String,
    pub insecure: bool,
    pub ca_cert: Option<PathBuf>,
}

impl EnterpriseEnv {
    /// Read the Enterprise connection settings from the environment.
    ///
    /// [`ENTERPRISE_URL_VAR`], [`ENTERPRISE_USER_VAR`] and
    /// [`ENTERPRISE_PASSWORD_VAR`] are all required; the failure message
    /// lists every variable that is missing. [`ENTERPRISE_INSECURE_VAR`]
    /// and [`ENTERPRISE_CA_CERT_VAR`] are optional extras.
    pub fn from_env() -> Result<Self> {
        let url = first_set(&[ENTERPRISE_URL_VAR]);
        let username = first_set(&[ENTERPRISE_USER_VAR]);
        let password = first_set(&[ENTERPRISE_PASSWORD_VAR]);

        match (url, username, password) {
            (Some(url), Some(username), Some(password)) => {
                let insecure = env::var(ENTERPRISE_INSECURE_VAR)
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(false);
                let ca_cert = first_set(&[ENTERPRISE_CA_CERT_VAR]).map(PathBuf::from);
                debug!(insecure, "resolved enterprise connection from environment");
                Ok(EnterpriseEnv {
                    url,
                    username,
                    password,
                    insecure,
                    ca_cert,
                })
            }
            (url, username, password) => {
                let mut missing = Vec::new();
                if url.is_none() {
                    missing.push(ENTERPRISE_URL_VAR);
                }
                if username.is_none() {
                    missing.push(ENTERPRISE_USER_VAR);
                }
                if password.is_none() {
                    missing.push(ENTERPRISE_PASSWORD_VAR);
                }
                Err(ApiError::MissingCredentials(format!(
                    "{} not set",
                    missing.join(", ")
                )))
            }
        }
    }
}

/// First variable in `names` that is set to a non-empty value.
fn first_set(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    })
}
