//! Client for the Redis Enterprise cluster management REST API
//!
//! Redis Enterprise clusters are self-hosted, so every cluster carries its
//! own API endpoint (port 9443 by default) and its own user accounts.
//! Authentication is HTTP basic auth with a cluster username and password.
//!
//! Every operation has an async form and a blocking `_sync` twin. The twins
//! are not a second implementation: they drive the same request pipeline to
//! completion on a shared runtime, so the two forms cannot drift apart.
//!
//! # Quick start
//!
//! ```no_run
//! use redis_enterprise::EnterpriseClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EnterpriseClient::builder()
//!         .base_url("https://cluster.example.com:9443")
//!         .username("admin@cluster.local")
//!         .password("your-password")
//!         .build()?;
//!
//!     let cluster = client.cluster_info_sync()?;
//!     println!("cluster {} has {} nodes", cluster.name, client.nodes_sync()?.len());
//!     Ok(())
//! }
//! ```
//!
//! Or from the environment (`REDIS_ENTERPRISE_URL`, `REDIS_ENTERPRISE_USER`
//! and `REDIS_ENTERPRISE_PASSWORD`, with `REDIS_ENTERPRISE_INSECURE` and
//! `REDIS_ENTERPRISE_CA_CERT` controlling TLS verification):
//!
//! ```no_run
//! let client = redis_enterprise::EnterpriseClient::from_env()?;
//! # Ok::<(), redis_enterprise::ApiError>(())
//! ```
//!
//! Resource modules ([`bdb`], [`cluster`], [`license`], [`logs`], [`nodes`],
//! [`users`]) cover the inventory surface with typed models; the typed verb
//! layer (`get`, `post`, `put`, `delete`) and the raw verb layer (`get_raw`,
//! `post_raw`, ...) accept any API path, so the whole API stays reachable
//! even where no resource helper exists.

pub mod bdb;
mod client;
pub mod cluster;
pub mod license;
pub mod logs;
pub mod nodes;
pub mod users;

#[cfg(feature = "test-support")]
pub mod testing;

pub use bdb::Database;
pub use client::{DEFAULT_BASE_URL, EnterpriseClient, EnterpriseClientBuilder};
pub use cluster::ClusterInfo;
pub use license::License;
pub use logs::{LogEntry, LogsQuery};
pub use nodes::Node;
pub use redis_mgmt_core::{ApiError, Result};
pub use users::User;
