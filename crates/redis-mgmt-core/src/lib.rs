//! Shared core for the Redis Cloud and Redis Enterprise API clients
//!
//! Both surface crates (`redis-cloud`, `redis-enterprise`) are thin layers
//! over the pipeline defined here: credentials are resolved once at client
//! construction, every operation describes itself as a [`PendingRequest`],
//! and [`RestClient::execute`] authenticates, sends and decodes it. The
//! blocking `_sync` call forms drive the same pipeline to completion on the
//! runtime owned by [`blocking`]; there is no second implementation.
//!
//! This crate is not meant to be used directly; depend on `redis-cloud` or
//! `redis-enterprise` instead.

pub mod auth;
pub mod blocking;
pub mod credentials;
pub mod error;
pub mod request;
pub mod transport;

pub use credentials::{Credentials, EnterpriseEnv};
pub use error::{ApiError, Result};
pub use request::{Method, PendingRequest};
pub use transport::{ClientConfig, DEFAULT_TIMEOUT, RestClient};
