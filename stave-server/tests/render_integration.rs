//! # HTTP Render Integration Tests
//!
//! Drives a real server over TCP: rendering, validation, statistics,
//! health probes and concurrent requests.

mod common;

use std::time::Duration;

use common::TestServer;
use reqwest::StatusCode;
use serde_json::{json, Value};
use stave_core::ComposeConfig;
use stave_server::ServiceConfig;

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .expect("client")
}

// ============================================================================
// Rendering
// ============================================================================

#[tokio::test]
async fn test_render_user_list_fragment() {
    let server = TestServer::start().await;
    let props = json!({
        "users": [
            {"id": 1, "name": "Ann Lee", "email": "ann@example.com", "role": "admin"},
            {"id": 2, "name": "Bo Diaz", "email": "bo@example.com", "role": "user"}
        ],
        "can_edit": false,
        "page_title": "Team"
    });

    let response = client()
        .post(server.url("/render/UserList"))
        .json(&props)
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.expect("body");
    assert!(html.contains("Users (2)"));
    assert!(html.contains(">AL</div>"));
    assert!(html.contains(">BD</div>"));
    assert!(html.contains("Team"));
    assert!(!html.contains("Quick Actions"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_render_json_is_deterministic() {
    let server = TestServer::start().await;
    let props = json!({"message": "same"});

    let mut trees = Vec::new();
    let mut ids = Vec::new();
    for _ in 0..2 {
        let body: Value = client()
            .post(server.url("/api/render/SimpleTest"))
            .json(&props)
            .send()
            .await
            .expect("request")
            .json()
            .await
            .expect("json");
        trees.push(body["tree"].clone());
        ids.push(body["render_id"].clone());
    }

    assert_eq!(trees[0], trees[1]);
    assert_ne!(ids[0], ids[1]);

    server.shutdown().await;
}

#[tokio::test]
async fn test_user_supplied_markup_is_escaped() {
    let server = TestServer::start().await;

    let html = client()
        .post(server.url("/render/SimpleTest"))
        .json(&json!({"message": "<script>alert(1)</script>"}))
        .send()
        .await
        .expect("request")
        .text()
        .await
        .expect("body");

    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));

    server.shutdown().await;
}

// ============================================================================
// Validation
// ============================================================================

#[tokio::test]
async fn test_rejects_invalid_names_and_props() {
    let server = TestServer::start().await;
    let client = client();

    let not_found = client
        .post(server.url("/render/DoesNotExist"))
        .send()
        .await
        .expect("request");
    assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

    let bad_name = client
        .post(server.url("/render/..%2Fsecret"))
        .send()
        .await
        .expect("request");
    assert_eq!(bad_name.status(), StatusCode::BAD_REQUEST);

    let array_props = client
        .post(server.url("/render/SimpleTest"))
        .json(&json!([1, 2, 3]))
        .send()
        .await
        .expect("request");
    assert_eq!(array_props.status(), StatusCode::BAD_REQUEST);
    let body: Value = array_props.json().await.expect("json");
    assert_eq!(body["kind"], "validation");

    server.shutdown().await;
}

#[tokio::test]
async fn test_oversized_body_rejected() {
    let server = TestServer::start().await;
    let padding = "x".repeat(2 * 1024 * 1024);

    let response = client()
        .post(server.url("/render/SimpleTest"))
        .json(&json!({"message": padding}))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    server.shutdown().await;
}

#[tokio::test]
async fn test_depth_limit_maps_to_server_error() {
    let config = ServiceConfig {
        compose: ComposeConfig::default().with_max_depth(2),
        ..ServiceConfig::default()
    };
    let server = TestServer::start_with(config).await;

    let response = client()
        .post(server.url("/render/SimpleTest"))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.expect("json");
    assert_eq!(body["kind"], "depth_exceeded");

    server.shutdown().await;
}

#[tokio::test]
async fn test_fallback_renders_error_box() {
    let config = ServiceConfig {
        compose: ComposeConfig::default().with_max_depth(2),
        fallback_on_error: true,
        ..ServiceConfig::default()
    };
    let server = TestServer::start_with(config).await;

    let body: Value = client()
        .post(server.url("/api/render/SimpleTest"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");

    assert_eq!(body["fallback"], true);
    assert!(body["html"]
        .as_str()
        .expect("html")
        .contains("Component Error: Composition depth exceeded"));

    server.shutdown().await;
}

// ============================================================================
// Statistics and health
// ============================================================================

#[tokio::test]
async fn test_stats_follow_renders() {
    let server = TestServer::start().await;
    let client = client();

    for _ in 0..3 {
        let status = client
            .post(server.url("/render/SimpleTest"))
            .send()
            .await
            .expect("request")
            .status();
        assert_eq!(status, StatusCode::OK);
    }

    let info: Value = client
        .get(server.url("/api/components/SimpleTest"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(info["render_count"], 3);

    let stats = server.state().service.render_stats();
    assert_eq!(stats["SimpleTest"].count, 3);

    let cleared = client
        .delete(server.url("/api/stats"))
        .send()
        .await
        .expect("request");
    assert_eq!(cleared.status(), StatusCode::NO_CONTENT);
    assert!(server.state().service.render_stats().is_empty());

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_probes() {
    let server = TestServer::start().await;
    let client = client();

    let live = client
        .get(server.url("/health/live"))
        .send()
        .await
        .expect("request");
    assert_eq!(live.status(), StatusCode::OK);

    let ready: Value = client
        .get(server.url("/health/ready"))
        .send()
        .await
        .expect("request")
        .json()
        .await
        .expect("json");
    assert_eq!(ready["status"], "healthy");
    assert_eq!(ready["checks"]["components"], 2);

    server.shutdown().await;
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test]
async fn test_concurrent_renders_are_isolated() {
    let server = TestServer::start().await;
    let client = client();

    let requests = (0..16).map(|i| {
        let client = client.clone();
        let url = server.url("/render/SimpleTest");
        async move {
            let html = client
                .post(url)
                .json(&json!({"message": format!("message {i}")}))
                .send()
                .await
                .expect("request")
                .text()
                .await
                .expect("body");
            (i, html)
        }
    });

    let handles: Vec<_> = requests.map(tokio::spawn).collect();
    for handle in handles {
        let (i, html) = handle.await.expect("task");
        assert!(html.contains(&format!("<p>message {i}</p>")));
    }

    assert_eq!(
        server.state().service.render_stats()["SimpleTest"].count,
        16
    );

    server.shutdown().await;
}
