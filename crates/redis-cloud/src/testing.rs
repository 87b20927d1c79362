//! Test support: a mock Cloud API server and fixture builders
//!
//! Compiled only with the `test-support` feature. [`MockCloudServer`] wraps a
//! wiremock server plus a [`CloudClient`] wired to it with well-known test
//! credentials; the fixture builders produce payloads in the Cloud wire shape
//! (camelCase, envelope wrappers) so tests read as intent, not JSON.

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::CloudClient;

/// API key the mock server's clients authenticate with.
pub const TEST_API_KEY: &str = "test-api-key";
/// API secret the mock server's clients authenticate with.
pub const TEST_API_SECRET: &str = "test-api-secret";

/// Wiremock-backed stand-in for the Cloud API
pub struct MockCloudServer {
    server: MockServer,
}

impl MockCloudServer {
    /// Start a fresh mock server.
    pub async fn start() -> Self {
        MockCloudServer {
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
    pub fn client(&self) -> CloudClient {
        CloudClient::builder()
            .api_key(TEST_API_KEY)
            .api_secret(TEST_API_SECRET)
            .base_url(self.server.uri())
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

    /// Mount an error response with the Cloud error body shape.
    pub async fn mock_error(&self, http_method: &str, request_path: &str, status: u16, error: &str) {
        self.mock_path(
            http_method,
            request_path,
            ResponseTemplate::new(status).set_body_json(json!({ "error": error })),
        )
        .await;
    }

    /// `GET /subscriptions` returning the account envelope.
    pub async fn mock_subscriptions_list(&self, subscriptions: Vec<Value>) {
        self.mock_path(
            "GET",
            "/subscriptions",
            ResponseTemplate::new(200).set_body_json(json!({
                "accountId": 1001,
                "subscriptions": subscriptions,
            })),
        )
        .await;
    }

    /// `GET /subscriptions/{id}`.
    pub async fn mock_subscription_get(&self, subscription_id: i32, subscription: Value) {
        self.mock_path(
            "GET",
            &format!("/subscriptions/{subscription_id}"),
            ResponseTemplate::new(200).set_body_json(subscription),
        )
        .await;
    }

    /// `GET /subscriptions/{id}/databases` returning the nested paging envelope.
    pub async fn mock_databases_list(&self, subscription_id: i32, databases: Vec<Value>) {
        self.mock_path(
            "GET",
            &format!("/subscriptions/{subscription_id}/databases"),
            ResponseTemplate::new(200).set_body_json(json!({
                "accountId": 1001,
                "subscription": [{
                    "subscriptionId": subscription_id,
                    "numberOfDatabases": databases.len(),
                    "databases": databases,
                }],
            })),
        )
        .await;
    }

    /// `GET /subscriptions/{id}/databases/{id}`.
    pub async fn mock_database_get(&self, subscription_id: i32, database_id: i32, database: Value) {
        self.mock_path(
            "GET",
            &format!("/subscriptions/{subscription_id}/databases/{database_id}"),
            ResponseTemplate::new(200).set_body_json(database),
        )
        .await;
    }
}

/// Builder for subscription payloads in the Cloud wire shape
pub struct SubscriptionFixture {
    id: i32,
    name: String,
    status: String,
    payment_method_type: String,
    memory_storage: String,
    provider: String,
    region: String,
}

impl SubscriptionFixture {
    pub fn new(id: i32, name: &str) -> Self {
        SubscriptionFixture {
            id,
            name: name.to_string(),
            status: "active".to_string(),
            payment_method_type: "credit-card".to_string(),
            memory_storage: "ram".to_string(),
            provider: "AWS".to_string(),
            region: "us-east-1".to_string(),
        }
    }

    #[must_use]
    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    #[must_use]
    pub fn payment_method_type(mut self, payment_method_type: &str) -> Self {
        self.payment_method_type = payment_method_type.to_string();
        self
    }

    #[must_use]
    pub fn memory_storage(mut self, memory_storage: &str) -> Self {
        self.memory_storage = memory_storage.to_string();
        self
    }

    #[must_use]
    pub fn cloud_provider(mut self, provider: &str) -> Self {
        self.provider = provider.to_string();
        self
    }

    #[must_use]
    pub fn region(mut self, region: &str) -> Self {
        self.region = region.to_string();
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "status": self.status,
            "paymentMethodType": self.payment_method_type,
            "memoryStorage": self.memory_storage,
            "cloudDetails": [{
                "provider": self.provider,
                "regions": [{ "region": self.region }],
            }],
        })
    }
}

/// Builder for database payloads in the Cloud wire shape
pub struct DatabaseFixture {
    id: i32,
    name: String,
    protocol: String,
    status: String,
    memory_limit_in_gb: f64,
    replication: bool,
    data_persistence: String,
    throughput_by: String,
    throughput_value: i64,
    public_endpoint: Option<String>,
}

impl DatabaseFixture {
    pub fn new(id: i32, name: &str) -> Self {
        DatabaseFixture {
            id,
            name: name.to_string(),
            protocol: "redis".to_string(),
            status: "active".to_string(),
            memory_limit_in_gb: 1.0,
            replication: false,
            data_persistence: "none".to_string(),
            throughput_by: "operations-per-second".to_string(),
            throughput_value: 10000,
            public_endpoint: None,
        }
    }

    #[must_use]
    pub fn protocol(mut self, protocol: &str) -> Self {
        self.protocol = protocol.to_string();
        self
    }

    #[must_use]
    pub fn status(mut self, status: &str) -> Self {
        self.status = status.to_string();
        self
    }

    #[must_use]
    pub fn memory_limit_in_gb(mut self, memory_limit_in_gb: f64) -> Self {
        self.memory_limit_in_gb = memory_limit_in_gb;
        self
    }

    #[must_use]
    pub fn replication(mut self, replication: bool) -> Self {
        self.replication = replication;
        self
    }

    #[must_use]
    pub fn data_persistence(mut self, data_persistence: &str) -> Self {
        self.data_persistence = data_persistence.to_string();
        self
    }

    #[must_use]
    pub fn throughput(mut self, by: &str, value: i64) -> Self {
        self.throughput_by = by.to_string();
        self.throughput_value = value;
        self
    }

    #[must_use]
    pub fn public_endpoint(mut self, public_endpoint: &str) -> Self {
        self.public_endpoint = Some(public_endpoint.to_string());
        self
    }

    pub fn build(&self) -> Value {
        let mut database = json!({
            "databaseId": self.id,
            "name": self.name,
            "protocol": self.protocol,
            "status": self.status,
            "memoryLimitInGb": self.memory_limit_in_gb,
            "replication": self.replication,
            "dataPersistence": self.data_persistence,
            "throughputMeasurement": {
                "by": self.throughput_by,
                "value": self.throughput_value,
            },
        });
        if let Some(endpoint) = &self.public_endpoint {
            database["publicEndpoint"] = json!(endpoint);
        }
        database
    }
}
