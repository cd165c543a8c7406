// Gateway integration tests: real axum server on an ephemeral port,
// wiremock standing in for the vendor API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mowgate::server::{router, AppState};
use mowgate_core::GatewayConfig;

// ── Helpers ─────────────────────────────────────────────────────────

async fn spawn_gateway(upstream: &MockServer, ttl: Duration) -> SocketAddr {
    let base: url::Url = upstream.uri().parse().unwrap();
    let gateway = GatewayConfig {
        login: "user@example.com".into(),
        password: SecretString::from("hunter2"),
        identity_url: base.clone(),
        track_url: base,
        timeout: Duration::from_secs(5),
    };

    let state = Arc::new(AppState::new(gateway, ttl));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Mount a working login/logout pair and a one-mower collection.
async fn mount_session(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": { "id": "tok-1", "attributes": { "provider": "husqvarna" } }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/mowers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "mower-7", "name": "Backyard" },
        ])))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/token/tok-1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(server)
        .await;
}

// ── /status ─────────────────────────────────────────────────────────

#[tokio::test]
async fn status_is_served_from_cache_within_the_ttl() {
    let upstream = MockServer::start().await;
    mount_session(&upstream).await;

    Mock::given(method("GET"))
        .and(path("/mowers/mower-7/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "batteryPercent": 80 })),
        )
        .expect(1) // the second request must come from the cache
        .mount(&upstream)
        .await;

    let addr = spawn_gateway(&upstream, Duration::from_secs(30)).await;

    let first = reqwest::get(format!("http://{addr}/status")).await.unwrap();
    assert_eq!(first.status(), 200);
    assert_eq!(
        first.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let first: Value = first.json().await.unwrap();

    let second: Value = reqwest::get(format!("http://{addr}/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first, json!({ "batteryPercent": 80 }));
    assert_eq!(second, first);
}

#[tokio::test]
async fn expired_cache_triggers_a_fresh_fetch() {
    let upstream = MockServer::start().await;
    mount_session(&upstream).await;

    Mock::given(method("GET"))
        .and(path("/mowers/mower-7/status"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "batteryPercent": 79 })),
        )
        .expect(2)
        .mount(&upstream)
        .await;

    let addr = spawn_gateway(&upstream, Duration::from_millis(100)).await;

    reqwest::get(format!("http://{addr}/status")).await.unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    let resp = reqwest::get(format!("http://{addr}/status")).await.unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn status_failure_maps_to_500() {
    let upstream = MockServer::start().await;
    mount_session(&upstream).await;

    Mock::given(method("GET"))
        .and(path("/mowers/mower-7/status"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&upstream)
        .await;

    let addr = spawn_gateway(&upstream, Duration::from_secs(30)).await;

    let resp = reqwest::get(format!("http://{addr}/status")).await.unwrap();
    assert_eq!(resp.status(), 500);
}

// ── Control routes ──────────────────────────────────────────────────

#[tokio::test]
async fn start_runs_one_full_session_cycle() {
    let upstream = MockServer::start().await;
    mount_session(&upstream).await;

    Mock::given(method("POST"))
        .and(path("/mowers/mower-7/control"))
        .and(body_json(json!({ "action": "START" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&upstream)
        .await;

    let addr = spawn_gateway(&upstream, Duration::from_secs(30)).await;

    let resp = reqwest::get(format!("http://{addr}/start")).await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.bytes().await.unwrap().is_empty());

    // One login, one control, one logout — no session reuse.
    let requests = upstream.received_requests().await.unwrap();
    let logins = requests.iter().filter(|r| r.url.path() == "/token").count();
    let logouts = requests
        .iter()
        .filter(|r| r.url.path() == "/token/tok-1")
        .count();
    assert_eq!(logins, 1);
    assert_eq!(logouts, 1);
}

#[tokio::test]
async fn persistent_control_failure_is_500_after_three_attempts() {
    let upstream = MockServer::start().await;
    mount_session(&upstream).await;

    Mock::given(method("POST"))
        .and(path("/mowers/mower-7/control"))
        .and(body_json(json!({ "action": "PARK" })))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&upstream)
        .await;

    let addr = spawn_gateway(&upstream, Duration::from_secs(30)).await;

    let resp = reqwest::get(format!("http://{addr}/park")).await.unwrap();
    assert_eq!(resp.status(), 500);
    assert!(resp.bytes().await.unwrap().is_empty());

    // Each attempt logged in fresh; none of the failed sessions logs out.
    let requests = upstream.received_requests().await.unwrap();
    let logins = requests.iter().filter(|r| r.url.path() == "/token").count();
    let logouts = requests
        .iter()
        .filter(|r| r.url.path() == "/token/tok-1")
        .count();
    assert_eq!(logins, 3);
    assert_eq!(logouts, 0);
}

// ── Route table ─────────────────────────────────────────────────────

#[tokio::test]
async fn unknown_paths_return_400_with_no_body() {
    let upstream = MockServer::start().await;
    let addr = spawn_gateway(&upstream, Duration::from_secs(30)).await;

    for p in ["/", "/restart", "/status/extra", "/favicon.ico"] {
        let resp = reqwest::get(format!("http://{addr}{p}")).await.unwrap();
        assert_eq!(resp.status(), 400, "path {p}");
        assert!(resp.bytes().await.unwrap().is_empty(), "path {p}");
    }

    assert!(upstream.received_requests().await.unwrap().is_empty());
}
