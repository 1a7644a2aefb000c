//! HTTP transport integration tests.
//!
//! Starts an axum server over the full handler set and exercises it with
//! reqwest.

use std::sync::Arc;

use sagip::service::{self, Service};
use sagip::InMemoryCache;
use serde_json::json;

use crate::support::full_service;

/// Bind to port 0 and return the actual address.
async fn start_server(service: Arc<Service<InMemoryCache>>) -> String {
    let app = service::router(service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_lists_registered_commands() {
    let base = start_server(Arc::new(full_service())).await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    let commands = body["commands"].as_array().unwrap();
    assert_eq!(commands.len(), 21);
    assert!(commands.iter().any(|c| c == "marker.create"));
}

#[tokio::test]
async fn headers_carry_the_identity() {
    let base = start_server(Arc::new(full_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/marker.create"))
        .header("x-user-id", "res-1")
        .header("x-user-role", "rescuer")
        .json(&json!({
            "category": "flood",
            "name": "Banaba creek overflow",
            "latitude": 14.5995,
            "longitude": 120.9842
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["reported_by"], "res-1");
    assert_eq!(body["category"], "flood");

    let resp = client
        .post(format!("{base}/marker.list"))
        .header("x-user-id", "cit-1")
        .header("x-user-role", "citizen")
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["markers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_identity_returns_401() {
    let base = start_server(Arc::new(full_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/marker.list"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("unauthorized"));
}

#[tokio::test]
async fn wrong_role_returns_403() {
    let base = start_server(Arc::new(full_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/barangay.create"))
        .header("x-user-id", "cit-1")
        .header("x-user-role", "citizen")
        .json(&json!({ "name": "Banaba", "address": "C. Raymundo Ave" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);
}

#[tokio::test]
async fn unknown_command_returns_404() {
    let base = start_server(Arc::new(full_service())).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/no.such.command"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
