//! HTTP API routes exercised through the router without a socket.

#![cfg(feature = "http-server")]

mod support;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use floatchat::chat::{ConversationStore, EchoProvider, HistoryFile};
use floatchat::config::FloatChatConfig;
use floatchat::http::{create_router, AppState};

fn test_state(history: Option<HistoryFile>) -> AppState {
    AppState::new(
        ConversationStore::new(),
        Arc::new(EchoProvider::new()),
        history,
        FloatChatConfig::default(),
    )
}

fn app(state: &AppState) -> Router {
    create_router(state.clone())
}

async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn get_json(state: &AppState, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(state, Method::GET, uri, None).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(state: &AppState, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = send(state, Method::POST, uri, Some(body)).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let state = test_state(None);
    let (status, body) = get_json(&state, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["provider"], "echo");
    assert_eq!(body["conversations"], 0);
}

#[tokio::test]
async fn test_regions() {
    let state = test_state(None);
    let (status, body) = get_json(&state, "/v1/regions").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 9);

    let (status, body) = get_json(&state, "/v1/regions/atlantis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "indian_ocean");
}

#[tokio::test]
async fn test_floats_are_filtered() {
    let state = test_state(None);
    let (status, body) =
        get_json(&state, "/v1/floats?regions=arabian_sea&statuses=active&depth_max=1000").await;
    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert!(!records.is_empty());
    assert_eq!(body["total_count"], records.len());
    assert!(records.iter().all(|r| r["status"] == "Active"
        && r["region"] == "arabian_sea"
        && r["depth"].as_f64().unwrap() <= 1000.0));
}

#[tokio::test]
async fn test_floats_default_to_default_region() {
    let state = test_state(None);
    let (status, body) = get_json(&state, "/v1/floats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["regions"], json!(["indian_ocean"]));
    let records = body["records"].as_array().unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r["region"] == "indian_ocean"));
}

#[tokio::test]
async fn test_invalid_filter_is_bad_request() {
    let state = test_state(None);
    let (status, body) = get_json(&state, "/v1/floats?statuses=sleeping").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_summary() {
    let state = test_state(None);
    let (status, body) =
        get_json(&state, "/v1/summary?regions=bay_of_bengal&parameter=salinity&method=median").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["snapshot"]["label"], "Salinity");
    assert_eq!(body["snapshot"]["method"], "Median");
    assert_eq!(body["snapshot"]["value"], body["stats"]["median"]);
}

#[tokio::test]
async fn test_export_csv() {
    let state = test_state(None);
    let request = Request::builder()
        .uri("/v1/export?regions=arabian_sea&parameters=temperature")
        .body(Body::empty())
        .unwrap();
    let response = app(&state).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("floatchat_filtered_export.csv"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let csv = String::from_utf8(bytes.to_vec()).unwrap();
    let header_row = csv.lines().next().unwrap();
    assert!(header_row.ends_with(",last_profile,Temp_C"));
    assert!(!header_row.contains("Salinity_PSU"));
}

#[tokio::test]
async fn test_export_location_only_keeps_measured_columns() {
    let state = test_state(None);
    let (status, bytes) = send(&state, Method::GET, "/v1/export?parameters=location", None).await;
    assert_eq!(status, StatusCode::OK);
    let csv = String::from_utf8(bytes).unwrap();
    let header_row = csv.lines().next().unwrap();
    assert!(header_row.contains("Temp_C"));
    assert!(header_row.contains("Salinity_PSU"));
    assert!(header_row.contains("Depth_m"));
}

#[tokio::test]
async fn test_classify() {
    let state = test_state(None);
    let (status, body) =
        post_json(&state, "/v1/classify", json!({ "query": "Compare salinity in the Arabian Sea" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plot"], "SalinityProfile");
    assert_eq!(body["analysis_type"], "RegionalComparison");
    assert_eq!(body["filters"]["regions"], json!(["arabian_sea"]));
}

#[tokio::test]
async fn test_chat_flow_and_payload_lookup() {
    let dir = TempDir::new().unwrap();
    let history_path = dir.path().join("chat_history.json");
    let state = test_state(Some(HistoryFile::new(&history_path)));

    let (status, turn) = post_json(&state, "/v1/chat", json!({ "quick_query": "salinity_bengal" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(turn["user_message_id"], 1);
    assert_eq!(turn["assistant_message_id"], 2);
    assert!(history_path.exists());

    let (status, payload) = get_json(&state, "/v1/messages/2/payload").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payload["region"], "bay_of_bengal");

    let (status, _) = get_json(&state, "/v1/messages/1/payload").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, list) = get_json(&state, "/v1/conversations").await;
    assert_eq!(list["conversations"][0]["title"], "Salinity profile in Bay of Bengal");
    assert_eq!(list["conversations"][0]["active"], true);

    let (status, found) = get_json(&state, "/v1/messages/search?q=bengal").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!found["messages"].as_array().unwrap().is_empty());

    let (status, bytes) = send(&state, Method::GET, "/v1/conversations/1/transcript", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(bytes).unwrap().starts_with("[user] Salinity profile in Bay of Bengal"));
}

#[tokio::test]
async fn test_chat_request_validation() {
    let state = test_state(None);
    let (status, _) = post_json(&state, "/v1/chat", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&state, "/v1/chat", json!({ "quick_query": "nope" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(&state, "/v1/chat", json!({ "message": "  \n " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_conversation_management() {
    let state = test_state(None);
    post_json(&state, "/v1/chat", json!({ "message": "argo summary" })).await;

    let (status, list) = post_json(&state, "/v1/conversations", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["conversations"].as_array().unwrap().len(), 2);
    assert_eq!(list["active_id"], 2);

    let (status, list) = post_json(&state, "/v1/conversations/1/select", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["active_id"], 1);
    assert_eq!(list["conversations"][0]["id"], 1);

    let (status, body) = post_json(&state, "/v1/conversations/99/select", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, bytes) = send(&state, Method::DELETE, "/v1/conversations", None).await;
    assert_eq!(status, StatusCode::OK);
    let cleared: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(cleared["removed"], 2);
}

#[tokio::test]
async fn test_stream_chat_emits_sse_events() {
    let state = test_state(None);
    let (status, bytes) = send(
        &state,
        Method::POST,
        "/v1/chat/stream",
        Some(json!({ "messages": [{ "role": "user", "content": "hello floats" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = String::from_utf8(bytes).unwrap();
    let events: Vec<&str> = body
        .lines()
        .filter_map(|line| line.strip_prefix("event:"))
        .map(str::trim)
        .collect();
    assert_eq!(events, vec!["start", "token", "token", "token", "done"]);
    assert!(body.contains(r#"{"text":" floats"}"#));
}

#[tokio::test]
async fn test_stream_chat_requires_messages() {
    let state = test_state(None);
    let (status, _) = send(&state, Method::POST, "/v1/chat/stream", Some(json!({ "messages": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_depth_plots() {
    let state = test_state(None);
    let (status, grid) = get_json(&state, "/v1/plots/hovmoller?region=arabian_sea&parameter=salinity").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(grid["months"].as_array().unwrap().len(), 12);
    assert_eq!(grid["values"][0].as_array().unwrap().len(), 24);

    let (status, profile) = get_json(&state, "/v1/plots/depth-time?parameter=temperature").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["depths"].as_array().unwrap().len(), 40);

    let (status, _) = get_json(&state, "/v1/plots/depth-time?parameter=oxygen").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_float_locations() {
    let state = test_state(None);
    let (status, body) = get_json(&state, "/v1/float-locations?count=40&regions=pacific_basin").await;
    assert_eq!(status, StatusCode::OK);
    let floats = body.as_array().unwrap();
    assert_eq!(floats.len(), 40);
    assert!(floats.iter().all(|f| f["region"] == "pacific_basin"));
    assert_eq!(floats[0]["float_id"], "WMO_5900000");
}
