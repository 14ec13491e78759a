use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::routing::{any, get};

use super::*;
use crate::config::HostConfig;

// =============================================================================
// HELPERS
// =============================================================================

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn echo(method: Method, RawQuery(query): RawQuery, headers: HeaderMap, body: String) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "method": method.as_str(),
        "query": query,
        "authorization": headers.get("authorization").and_then(|v| v.to_str().ok()),
        "forwarded_secret": headers.get("x-hop").is_some(),
        "body": body,
    }))
}

fn fake_backend() -> Router {
    Router::new()
        .route("/utilities/analysis/echo", any(echo))
        .route(
            "/utilities/dynamic-test/start-process",
            any(|| async { (StatusCode::CONFLICT, Json(serde_json::json!({"message": "login"}))) }),
        )
        .route(
            "/utilities/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                "late"
            }),
        )
}

fn host_state(backend_url: &str, timeout: Duration) -> AppState {
    let config = HostConfig {
        port: 0,
        backend_url: backend_url.to_owned(),
        backend_timeout: timeout,
        max_upload_bytes: 64,
    };
    AppState::new(config).unwrap()
}

async fn spawn_host(backend_url: &str, timeout: Duration) -> String {
    spawn(crate::routes::api_routes(host_state(backend_url, timeout))).await
}

// =============================================================================
// PURE HELPERS
// =============================================================================

#[test]
fn end_to_end_headers_drops_hop_by_hop_and_nominated() {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive, X-Hop"));
    headers.insert("x-hop", HeaderValue::from_static("1"));
    headers.insert(header::HOST, HeaderValue::from_static("ui.local"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let out = end_to_end_headers(&headers);
    assert_eq!(out.len(), 2);
    assert_eq!(out.get(header::AUTHORIZATION).unwrap(), "Bearer t");
    assert!(out.get("x-hop").is_none());
}

#[test]
fn upstream_url_joins_without_double_slash() {
    assert_eq!(
        upstream_url("http://backend:5000/", "/utilities/analysis/get-chunks?x=1"),
        "http://backend:5000/utilities/analysis/get-chunks?x=1"
    );
}

// =============================================================================
// END TO END
// =============================================================================

#[tokio::test]
async fn forwards_method_query_headers_and_body() {
    let backend = spawn(fake_backend()).await;
    let host = spawn_host(&backend, Duration::from_secs(5)).await;

    let reply: serde_json::Value = reqwest::Client::new()
        .post(format!("{host}/utilities/analysis/echo?inputMediaUrl=a%20b"))
        .header("authorization", "Bearer abc")
        .header("connection", "x-hop")
        .header("x-hop", "secret")
        .body("{\"chunk\":\"c1\"}")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(reply["method"], "POST");
    assert_eq!(reply["query"], "inputMediaUrl=a%20b");
    assert_eq!(reply["authorization"], "Bearer abc");
    assert_eq!(reply["forwarded_secret"], false);
    assert_eq!(reply["body"], "{\"chunk\":\"c1\"}");
}

#[tokio::test]
async fn passes_backend_status_through() {
    let backend = spawn(fake_backend()).await;
    let host = spawn_host(&backend, Duration::from_secs(5)).await;

    let response = reqwest::Client::new()
        .post(format!("{host}/utilities/dynamic-test/start-process"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 409);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "login");
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let host = spawn_host(&dead, Duration::from_secs(5)).await;

    let response = reqwest::get(format!("{host}/utilities/analysis/get-chunks")).await.unwrap();
    assert_eq!(response.status().as_u16(), 502);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], crate::error::UNAVAILABLE_MESSAGE);
}

#[tokio::test]
async fn slow_backend_is_gateway_timeout() {
    let backend = spawn(fake_backend()).await;
    let host = spawn_host(&backend, Duration::from_millis(200)).await;

    let response = reqwest::get(format!("{host}/utilities/slow")).await.unwrap();
    assert_eq!(response.status().as_u16(), 504);
}

#[tokio::test]
async fn oversized_body_is_rejected_before_forwarding() {
    let backend = spawn(fake_backend()).await;
    let host = spawn_host(&backend, Duration::from_secs(5)).await;

    let response = reqwest::Client::new()
        .post(format!("{host}/utilities/analysis/echo"))
        .body(vec![b'x'; 1024])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 413);
}

#[tokio::test]
async fn healthz_is_ok() {
    let host = spawn_host("http://127.0.0.1:9", Duration::from_secs(1)).await;
    let response = reqwest::get(format!("{host}/healthz")).await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}
