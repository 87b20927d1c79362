//! Test support: a mock cluster API server and fixture builders
//!
//! Compiled only with the `test-support` feature. [`MockEnterpriseServer`]
//! wraps a wiremock server plus an [`EnterpriseClient`] wired to it with
//! well-known test credentials; the fixture builders produce payloads in the
//! cluster wire shape (snake_case, bare arrays for collections) so tests
//! read as intent, not JSON.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::EnterpriseClient;

/// Username the mock server's clients authenticate with.
pub const TEST_USERNAME: &str = "admin@redis.local";
/// Password the mock server's clients authenticate with.
pub const TEST_PASSWORD: &str = "test-password";

/// Wiremock-backed stand-in for a cluster's management API
pub struct MockEnterpriseServer {
    server: MockServer,
}

impl MockEnterpriseServer {
    /// Start a fresh mock server.
    pub async fn start() -> Self {
        MockEnterpriseServer {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// The underlying wiremock server, for custom expectations.
    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// A client wired to this server with the test credentials.
    pub fn client(&self) -> EnterpriseClient {
        EnterpriseClient::builder()
            .base_url(self.server.uri())
            .username(TEST_USERNAME)
            .password(TEST_PASSWORD)
            .build()
            .expect("mock client settings are valid")
    }

    /// Mount an arbitrary response for `http_method` + `request_path`.
    pub async fn mock_path(
        &self,
        http_method: &str,
        request_path: &str,
        response: ResponseTemplate,
    ) {
        Mock::given(method(http_method))
            .and(path(request_path))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Mount an error response with the cluster error body shape.
    pub async fn mock_error(
        &self,
        http_method: &str,
        request_path: &str,
        status: u16,
        error_code: &str,
        description: &str,
    ) {
        self.mock_path(
            http_method,
            request_path,
            ResponseTemplate::new(status).set_body_json(json!({
                "error_code": error_code,
                "description": description,
            })),
        )
        .await;
    }

    /// `GET /v1/cluster`.
    pub async fn mock_cluster_info(&self, cluster: Value) {
        self.mock_path(
            "GET",
            "/v1/cluster",
            ResponseTemplate::new(200).set_body_json(cluster),
        )
        .await;
    }

    /// `GET /v1/license`.
    pub async fn mock_license(&self, license: Value) {
        self.mock_path(
            "GET",
            "/v1/license",
            ResponseTemplate::new(200).set_body_json(license),
        )
        .await;
    }

    /// `GET /v1/bdbs` returning a bare array.
    pub async fn mock_databases_list(&self, databases: Vec<Value>) {
        self.mock_path(
            "GET",
            "/v1/bdbs",
            ResponseTemplate::new(200).set_body_json(Value::Array(databases)),
        )
        .await;
    }

    /// `GET /v1/bdbs/{uid}`.
    pub async fn mock_database_get(&self, uid: u32, database: Value) {
        self.mock_path(
            "GET",
            &format!("/v1/bdbs/{uid}"),
            ResponseTemplate::new(200).set_body_json(database),
        )
        .await;
    }

    /// `GET /v1/nodes` returning a bare array.
    pub async fn mock_nodes_list(&self, nodes: Vec<Value>) {
        self.mock_path(
            "GET",
            "/v1/nodes",
            ResponseTemplate::new(200).set_body_json(Value::Array(nodes)),
        )
        .await;
    }

    /// `GET /v1/nodes/{uid}`.
    pub async fn mock_node_get(&self, uid: u32, node: Value) {
        self.mock_path(
            "GET",
            &format!("/v1/nodes/{uid}"),
            ResponseTemplate::new(200).set_body_json(node),
        )
        .await;
    }

    /// `GET /v1/users` returning a bare array.
    pub async fn mock_users_list(&self, users: Vec<Value>) {
        self.mock_path(
            "GET",
            "/v1/users",
            ResponseTemplate::new(200).set_body_json(Value::Array(users)),
        )
        .await;
    }

    /// `GET /v1/users/{uid}`.
    pub async fn mock_user_get(&self, uid: u32, user: Value) {
        self.mock_path(
            "GET",
            &format!("/v1/users/{uid}"),
            ResponseTemplate::new(200).set_body_json(user),
        )
        .await;
    }
}

/// Builder for cluster payloads in the cluster wire shape
pub struct ClusterFixture {
    name: String,
    nodes: Vec<u32>,
}

impl ClusterFixture {
    pub fn new(name: &str) -> Self {
        ClusterFixture {
            name: name.to_string(),
            nodes: vec![1],
        }
    }

    #[must_use]
    pub fn nodes(mut self, nodes: Vec<u32>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "name": self.name,
            "nodes": self.nodes,
            "created_time": "2024-01-01T00:00:00Z",
            "rack_aware": false,
        })
    }
}

/// Builder for license payloads
pub struct LicenseFixture {
    expired: bool,
    shards_limit: u64,
}

impl LicenseFixture {
    /// A healthy license.
    pub fn new() -> Self {
        LicenseFixture {
            expired: false,
            shards_limit: 10,
        }
    }

    /// An expired license.
    pub fn expired() -> Self {
        LicenseFixture {
            expired: true,
            ..LicenseFixture::new()
        }
    }

    #[must_use]
    pub fn shards_limit(mut self, shards_limit: u64) -> Self {
        self.shards_limit = shards_limit;
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "expired": self.expired,
            "expiration_date": "2030-01-01T00:00:00Z",
            "shards_limit": self.shards_limit,
            "cluster_name": "test-cluster",
        })
    }
}

impl Default for LicenseFixture {
    fn default() -> Self {
        LicenseFixture::new()
    }
}

/// Builder for database payloads in the cluster wire shape
pub struct DatabaseFixture {
    uid: u32,
    name: String,
    memory_size: u64,
    port: u16,
    status: String,
}

impl DatabaseFixture {
    pub fn new(uid: u32, name: &str) -> Self {
        DatabaseFixture {
            uid,
            name: name.to_string(),
            memory_size: 1024 * 1024 * 1024,
            port: 12000,
            status: "active".to_string(),
        }
    }

    #[must_use]
    pub fn memory_size(mut self, memory_size: u64) -> Self {
        self.memory_size = memory_size;
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    #[must_use]
    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "uid": self.uid,
            "name": self.name,
            "type": "redis",
            "memory_size": self.memory_size,
            "port": self.port,
            "status": self.status,
            "replication": false,
            "shards_count": 1,
        })
    }
}

/// Builder for node payloads
pub struct NodeFixture {
    uid: u32,
    addr: String,
    cores: u32,
    total_memory: u64,
}

impl NodeFixture {
    pub fn new(uid: u32, addr: &str) -> Self {
        NodeFixture {
            uid,
            addr: addr.to_string(),
            cores: 4,
            total_memory: 16 * 1024 * 1024 * 1024,
        }
    }

    #[must_use]
    pub fn cores(mut self, cores: u32) -> Self {
        self.cores = cores;
        self
    }

    #[must_use]
    pub fn total_memory(mut self, total_memory: u64) -> Self {
        self.total_memory = total_memory;
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "uid": self.uid,
            "addr": self.addr,
            "cores": self.cores,
            "total_memory": self.total_memory,
            "status": "active",
            "shard_count": 0,
        })
    }
}

/// Builder for user payloads
pub struct UserFixture {
    uid: u32,
    email: String,
    name: String,
    role: String,
}

impl UserFixture {
    pub fn new(uid: u32, email: &str) -> Self {
        UserFixture {
            uid,
            email: email.to_string(),
            name: String::new(),
            role: "admin".to_string(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    #[must_use]
    pub fn role(mut self, role: &str) -> Self {
        self.role = role.to_string();
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "uid": self.uid,
            "email": self.email,
            "name": self.name,
            "role": self.role,
            "auth_method": "regular",
        })
    }
}
