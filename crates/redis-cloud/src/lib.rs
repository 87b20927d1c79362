//! Client for the Redis Cloud management REST API
//!
//! The Cloud API manages subscriptions and the databases inside them for
//! Redis Cloud accounts. Authentication uses the account key pair, sent as
//! the `x-api-key` / `x-api-secret-key` header pair on every request.
//!
//! Every operation has an async form and a blocking `_sync` twin. The twins
//! are not a second implementation: they drive the same request pipeline to
//! completion on a shared runtime, so the two forms cannot drift apart.
//!
//! # Quick start
//!
//! ```no_run
//! use redis_cloud::CloudClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CloudClient::builder()
//!         .api_key("your-api-key")
//!         .api_secret("your-api-secret")
//!         .build()?;
//!
//!     let subscriptions = client.subscriptions_sync()?;
//!     println!("{subscriptions:#}");
//!     Ok(())
//! }
//! ```
//!
//! Or from the environment (`REDIS_CLOUD_API_KEY` / `REDIS_CLOUD_API_SECRET`,
//! with the legacy `REDIS_CLOUD_ACCOUNT_KEY` / `REDIS_CLOUD_SECRET_KEY` /
//! `REDIS_CLOUD_USER_KEY` names accepted as fallbacks, and
//! `REDIS_CLOUD_API_URL` overriding the production endpoint):
//!
//! ```no_run
//! let client = redis_cloud::CloudClient::from_env()?;
//! # Ok::<(), redis_cloud::ApiError>(())
//! ```
//!
//! The typed verb layer (`get`, `post`, `put`, `delete`) and the raw verb
//! layer (`get_raw`, `post_raw`, ...) accept any API path, so the whole API
//! stays reachable even where no resource helper exists.

mod client;
mod databases;
mod subscriptions;

#[cfg(feature = "test-support")]
pub mod testing;

pub use client::{CloudClient, CloudClientBuilder, DEFAULT_API_URL};
pub use redis_mgmt_core::{ApiError, Result};
