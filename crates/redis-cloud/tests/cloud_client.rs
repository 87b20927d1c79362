//! Integration tests for the Cloud client against a mock API server

use pretty_assertions::assert_eq;
use redis_cloud::testing::{
    DatabaseFixture, MockCloudServer, SubscriptionFixture, TEST_API_KEY, TEST_API_SECRET,
};
use redis_cloud::{ApiError, CloudClient};
use serde_json::{Value, json};
use serial_test::serial;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Resource methods
// ============================================================================

#[tokio::test]
async fn subscriptions_issues_one_authenticated_get() {
    let server = MockCloudServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions"))
        .and(header("x-api-key", TEST_API_KEY))
        .and(header("x-api-secret-key", TEST_API_SECRET))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "accountId": 1001,
            "subscriptions": [],
        })))
        .expect(1)
        .mount(server.inner())
        .await;

    let client = server.client();
    let value = client.subscriptions().await.unwrap();
    assert_eq!(value["accountId"], 1001);
}

#[tokio::test]
async fn subscriptions_returns_the_account_envelope() {
    let server = MockCloudServer::start().await;

    let production = SubscriptionFixture::new(123, "Production")
        .status("active")
        .cloud_provider("AWS")
        .region("us-east-1")
        .build();
    let development = SubscriptionFixture::new(456, "Development")
        .status("pending")
        .cloud_provider("GCP")
        .region("us-central1")
        .build();
    server
        .mock_subscriptions_list(vec![production, development])
        .await;

    let client = server.client();
    let value = client.subscriptions().await.unwrap();

    let subscriptions = value["subscriptions"].as_array().unwrap();
    assert_eq!(subscriptions.len(), 2);
    assert_eq!(subscriptions[0]["name"], "Production");
    assert_eq!(subscriptions[1]["status"], "pending");
}

#[tokio::test]
async fn subscription_templates_the_id_into_the_path() {
    let server = MockCloudServer::start().await;

    let subscription = SubscriptionFixture::new(123, "Production")
        .payment_method_type("marketplace")
        .memory_storage("ram")
        .build();
    server.mock_subscription_get(123, subscription).await;

    let client = server.client();
    let value = client.subscription(123).await.unwrap();

    assert_eq!(value["id"], 123);
    assert_eq!(value["paymentMethodType"], "marketplace");
}

#[tokio::test]
async fn databases_returns_the_nested_envelope() {
    let server = MockCloudServer::start().await;

    let database = DatabaseFixture::new(1001, "cache-primary")
        .memory_limit_in_gb(2.0)
        .replication(true)
        .public_endpoint("redis-1001.c1.us-east-1.ec2.cloud.redislabs.com:12001")
        .build();
    server.mock_databases_list(123, vec![database.clone()]).await;

    let client = server.client();
    let value = client.databases(123, None, None).await.unwrap();

    assert_eq!(value["subscription"][0]["subscriptionId"], 123);
    assert_eq!(value["subscription"][0]["databases"][0], database);
}

#[tokio::test]
async fn databases_passes_pagination_through() {
    let server = MockCloudServer::start().await;

    Mock::given(method("GET"))
        .and(path("/subscriptions/123/databases"))
        .and(query_param("offset", "10"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"subscription": []})))
        .expect(1)
        .mount(server.inner())
        .await;

    let client = server.client();
    client.databases(123, Some(10), Some(25)).await.unwrap();

    let received = server.inner().received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].url.query(), Some("offset=10&limit=25"));
}

#[tokio::test]
async fn databases_sends_no_query_without_pagination() {
    let server = MockCloudServer::start().await;
    server.mock_databases_list(123, vec![]).await;

    let client = server.client();
    client.databases(123, None, None).await.unwrap();

    let received = server.inner().received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), None);
}

#[tokio::test]
async fn database_templates_both_ids_into_the_path() {
    let server = MockCloudServer::start().await;

    let database = DatabaseFixture::new(1001, "cache-primary")
        .data_persistence("aof-every-1-second")
        .throughput("operations-per-second", 25000)
        .build();
    server.mock_database_get(123, 1001, database).await;

    let client = server.client();
    let value = client.database(123, 1001).await.unwrap();

    assert_eq!(value["databaseId"], 1001);
    assert_eq!(value["dataPersistence"], "aof-every-1-second");
    assert_eq!(value["throughputMeasurement"]["value"], 25000);
}

#[tokio::test]
async fn a_shared_client_serves_concurrent_requests() {
    let server = MockCloudServer::start().await;
    server
        .mock_subscriptions_list(vec![SubscriptionFixture::new(1, "only").build()])
        .await;

    let client = server.client();
    let calls = (0..8).map(|_| {
        let client = client.clone();
        async move { client.subscriptions().await }
    });

    let results = futures::future::try_join_all(calls).await.unwrap();
    assert_eq!(results.len(), 8);
    assert!(results.windows(2).all(|pair| pair[0] == pair[1]));
}

#[tokio::test]
async fn repeated_gets_return_equal_results() {
    let server = MockCloudServer::start().await;
    server
        .mock_subscriptions_list(vec![SubscriptionFixture::new(1, "only").build()])
        .await;

    let client = server.client();
    let first = client.subscriptions().await.unwrap();
    let second = client.subscriptions().await.unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// Verb layer
// ============================================================================

#[tokio::test]
async fn typed_get_decodes_into_caller_types() {
    let server = MockCloudServer::start().await;
    server
        .mock_path(
            "GET",
            "/subscriptions/123",
            ResponseTemplate::new(200).set_body_json(json!({"id": 123, "name": "Production"})),
        )
        .await;

    #[derive(serde::Deserialize)]
    struct Subscription {
        id: i32,
        name: String,
    }

    let client = server.client();
    let subscription: Subscription = client.get("/subscriptions/123").await.unwrap();
    assert_eq!(subscription.id, 123);
    assert_eq!(subscription.name, "Production");
}

#[tokio::test]
async fn get_with_query_keeps_duplicate_keys_in_order() {
    let server = MockCloudServer::start().await;
    server
        .mock_path(
            "GET",
            "/subscriptions",
            ResponseTemplate::new(200).set_body_json(json!({})),
        )
        .await;

    let client = server.client();
    let query = vec![
        ("status".to_string(), "active".to_string()),
        ("status".to_string(), "pending".to_string()),
    ];
    let _: Value = client.get_with_query("/subscriptions", &query).await.unwrap();

    let received = server.inner().received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("status=active&status=pending"));
}

#[tokio::test]
async fn post_raw_sends_the_body_and_returns_the_response() {
    let server = MockCloudServer::start().await;
    server
        .mock_path(
            "POST",
            "/subscriptions/123/databases",
            ResponseTemplate::new(200).set_body_json(json!({"taskId": "task-7"})),
        )
        .await;

    let client = server.client();
    let value = client
        .post_raw(
            "/subscriptions/123/databases",
            json!({"name": "cache", "memoryLimitInGb": 1.0}),
        )
        .await
        .unwrap();

    assert_eq!(value["taskId"], "task-7");
    let received = server.inner().received_requests().await.unwrap();
    let sent: Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(sent["name"], "cache");
}

#[tokio::test]
async fn delete_with_query_forwards_the_pairs() {
    let server = MockCloudServer::start().await;
    server
        .mock_path(
            "DELETE",
            "/subscriptions/123/databases/7",
            ResponseTemplate::new(204),
        )
        .await;

    let client = server.client();
    let query = vec![("force".to_string(), "true".to_string())];
    let value: Value = client
        .delete_with_query("/subscriptions/123/databases/7", &query)
        .await
        .unwrap();

    assert_eq!(value, Value::Null);
    let received = server.inner().received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("force=true"));
}

#[tokio::test]
async fn delete_raw_accepts_an_empty_response() {
    let server = MockCloudServer::start().await;
    server
        .mock_path(
            "DELETE",
            "/subscriptions/123/databases/1001",
            ResponseTemplate::new(204),
        )
        .await;

    let client = server.client();
    let value = client
        .delete_raw("/subscriptions/123/databases/1001")
        .await
        .unwrap();
    assert_eq!(value, Value::Null);
}

// ============================================================================
// Error taxonomy
// ============================================================================

#[tokio::test]
async fn missing_subscription_maps_to_http_status() {
    let server = MockCloudServer::start().await;
    server
        .mock_error("GET", "/subscriptions/42", 404, "subscription 42 not found")
        .await;

    let client = server.client();
    let err = client.subscription(42).await.unwrap_err();

    assert!(err.is_not_found());
    let ApiError::HttpStatus { code, detail } = &err else {
        panic!("expected HttpStatus, got {err:?}");
    };
    assert_eq!(*code, 404);
    assert!(detail.contains("subscription 42 not found"));
}

#[tokio::test]
async fn unauthorized_maps_to_http_status_401() {
    let server = MockCloudServer::start().await;
    server
        .mock_error("GET", "/subscriptions", 401, "invalid API credentials")
        .await;

    let client = server.client();
    let err = client.subscriptions().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!err.is_retryable());
}

// ============================================================================
// Blocking twins
// ============================================================================

#[test]
fn sync_and_async_forms_agree_on_success() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (server, client) = rt.block_on(async {
        let server = MockCloudServer::start().await;
        server
            .mock_subscriptions_list(vec![SubscriptionFixture::new(123, "Production").build()])
            .await;
        let client = server.client();
        (server, client)
    });

    let blocking_value = client.subscriptions_sync().unwrap();
    let async_value = rt.block_on(client.subscriptions()).unwrap();
    assert_eq!(blocking_value, async_value);
    drop(server);
}

#[test]
fn sync_and_async_forms_agree_on_http_errors() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (server, client) = rt.block_on(async {
        let server = MockCloudServer::start().await;
        server
            .mock_error("GET", "/subscriptions/42", 404, "subscription 42 not found")
            .await;
        let client = server.client();
        (server, client)
    });

    let blocking_err = client.subscription_sync(42).unwrap_err();
    let async_err = rt.block_on(client.subscription(42)).unwrap_err();
    assert_eq!(blocking_err, async_err);
    assert!(blocking_err.is_not_found());
    drop(server);
}

#[test]
fn sync_and_async_forms_agree_on_transport_errors() {
    // A freshly released port: connections are refused, not black-holed.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = CloudClient::builder()
        .api_key(TEST_API_KEY)
        .api_secret(TEST_API_SECRET)
        .base_url(format!("http://127.0.0.1:{port}"))
        .build()
        .unwrap();

    let rt = tokio::runtime::Runtime::new().unwrap();
    let blocking_err = client.subscriptions_sync().unwrap_err();
    let async_err = rt.block_on(client.subscriptions()).unwrap_err();

    assert!(matches!(blocking_err, ApiError::Transport(_)));
    assert_eq!(blocking_err, async_err);
}

#[test]
fn raw_verb_twins_agree() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let (server, client) = rt.block_on(async {
        let server = MockCloudServer::start().await;
        server
            .mock_path(
                "PUT",
                "/subscriptions/123",
                ResponseTemplate::new(200).set_body_json(json!({"id": 123, "name": "renamed"})),
            )
            .await;
        let client = server.client();
        (server, client)
    });

    let body = json!({"name": "renamed"});
    let blocking_value = client.put_raw_sync("/subscriptions/123", body.clone()).unwrap();
    let async_value = rt
        .block_on(client.put_raw("/subscriptions/123", body))
        .unwrap();
    assert_eq!(blocking_value, async_value);
    assert_eq!(blocking_value["name"], "renamed");
    drop(server);
}

// ============================================================================
// Environment construction
// ============================================================================

fn set_var(name: &str, value: &str) {
    unsafe { std::env::set_var(name, value) };
}

fn remove_var(name: &str) {
    unsafe { std::env::remove_var(name) };
}

fn clear_cloud_env() {
    for name in [
        "REDIS_CLOUD_API_KEY",
        "REDIS_CLOUD_ACCOUNT_KEY",
        "REDIS_CLOUD_API_SECRET",
        "REDIS_CLOUD_SECRET_KEY",
        "REDIS_CLOUD_USER_KEY",
        "REDIS_CLOUD_API_URL",
    ] {
        remove_var(name);
    }
}

#[test]
#[serial]
fn from_env_fails_fast_without_credentials() {
    clear_cloud_env();

    let err = CloudClient::from_env().unwrap_err();
    assert!(matches!(err, ApiError::MissingCredentials(_)));
    assert!(err.to_string().contains("API key"));
}

#[test]
#[serial]
fn from_env_requires_a_secret_even_with_a_key() {
    clear_cloud_env();
    set_var("REDIS_CLOUD_API_KEY", "test-api-key");

    let err = CloudClient::from_env().unwrap_err();
    assert!(matches!(err, ApiError::MissingCredentials(_)));
    assert!(err.to_string().contains("API secret"));
    clear_cloud_env();
}

#[tokio::test]
#[serial]
async fn from_env_honors_the_url_override() {
    clear_cloud_env();
    let server = MockCloudServer::start().await;
    set_var("REDIS_CLOUD_API_KEY", TEST_API_KEY);
    set_var("REDIS_CLOUD_API_SECRET", TEST_API_SECRET);
    set_var("REDIS_CLOUD_API_URL", &server.uri());

    server.mock_subscriptions_list(vec![]).await;

    let client = CloudClient::from_env().unwrap();
    assert_eq!(client.base_url(), server.uri());
    let value = client.subscriptions().await.unwrap();
    assert_eq!(value["accountId"], 1001);
    clear_cloud_env();
}

#[test]
#[serial]
fn from_env_accepts_the_legacy_alias_pair() {
    clear_cloud_env();
    set_var("REDIS_CLOUD_ACCOUNT_KEY", "legacy-key");
    set_var("REDIS_CLOUD_USER_KEY", "legacy-secret");

    let client = CloudClient::from_env().unwrap();
    assert_eq!(client.base_url(), redis_cloud::DEFAULT_API_URL);
    clear_cloud_env();
}
