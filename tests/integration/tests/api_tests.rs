//! API Integration Tests
//!
//! Each test runs the real API app against a stub upstream on ephemeral ports.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use std::time::{Duration, Instant};

use integration_tests::{
    assert_json, assert_status, fixtures::*, StubUpstream, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

const ANALYZE: &str = "/api/analyze";

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let upstream = StubUpstream::start(roster_by_id(&[])).await.unwrap();
    let server = TestServer::start(&upstream).await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(upstream.requests().is_empty());
}

// ============================================================================
// Analyze Tests
// ============================================================================

#[tokio::test]
async fn test_analyze_single_member() {
    let upstream = StubUpstream::start(json!({"members": {"1": {"name": "Alice", "level": 5}}}))
        .await
        .unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server.post(ANALYZE, &AnalyzeBody::new("9001")).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["faction_id"], "9001");
    let alice = &body["members"][0];
    assert_eq!(alice["id"], 1);
    assert_eq!(alice["name"], "Alice");
    assert_eq!(alice["level"], 5);
    assert_eq!(alice["age"], 101);
    assert_eq!(alice["faction_id"], 4242);
    assert_eq!(alice["current"]["attackswon"], 10);
    assert_eq!(alice["current"]["refills"], 1);
    assert_eq!(alice["weekly"]["attackswon"], 7);
    assert_eq!(alice["monthly"]["attackswon"], 3);
    assert_eq!(alice["current"].as_object().unwrap().len(), 15);
    assert_eq!(alice["weekly"].as_object().unwrap().len(), 11);
    assert_eq!(alice["monthly"].as_object().unwrap().len(), 11);
}

#[tokio::test]
async fn test_upstream_requests() {
    let upstream = StubUpstream::start(roster_by_id(&[8])).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server.post(ANALYZE, &AnalyzeBody::new("31")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let requests = upstream.requests();
    assert_eq!(requests.len(), 4);

    let roster = &requests[0];
    assert_eq!(roster.path, "/v2/faction/31/members");
    assert_eq!(roster.query["key"], TEST_API_KEY);
    assert_eq!(roster.user_agent.as_deref(), Some("TornStats/1.0"));

    let current = &requests[1];
    assert_eq!(current.path, "/user/8");
    assert_eq!(current.query["selections"], "personalstats,profile");
    assert_eq!(current.query["stat"].split(',').count(), 15);
    assert!(!current.query.contains_key("timestamp"));

    for historical in &requests[2..] {
        assert_eq!(historical.query["selections"], "personalstats");
        assert_eq!(historical.query["stat"].split(',').count(), 11);
        assert!(historical.query.contains_key("timestamp"));
    }
}

#[tokio::test]
async fn test_list_shaped_roster_matches_mapping() {
    let ids = [30, 4, 17];
    let by_id = StubUpstream::start(roster_by_id(&ids)).await.unwrap();
    let list = StubUpstream::start(roster_list(&ids)).await.unwrap();

    let mut bodies = Vec::new();
    for upstream in [&by_id, &list] {
        let server = TestServer::start(upstream).await.unwrap();
        let response = server.post(ANALYZE, &AnalyzeBody::new("5")).await.unwrap();
        let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
        bodies.push(body);
    }

    assert_eq!(bodies[0], bodies[1]);
    let order: Vec<i64> = bodies[0]["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(order, ids);
}

#[tokio::test]
async fn test_roster_error_is_server_error() {
    let upstream = StubUpstream::start(upstream_error("Incorrect key")).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server.post(ANALYZE, &AnalyzeBody::new("5")).await.unwrap();
    let body: Value = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();

    assert!(body["error"].as_str().unwrap().contains("Incorrect key"));
    assert_eq!(upstream.requests().len(), 1);
}

#[tokio::test]
async fn test_failing_member_is_zero_filled() {
    let upstream = StubUpstream::start(roster_by_id(&[1, 2, 3])).await.unwrap();
    upstream.fail_member(2);
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server.post(ANALYZE, &AnalyzeBody::new("5")).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let members = body["members"].as_array().unwrap();
    assert_eq!(members.len(), 3);

    let failed = &members[1];
    assert_eq!(failed["id"], 2);
    assert_eq!(failed["age"], 0);
    assert_eq!(failed["faction_id"], 0);
    for (window, size) in [("current", 15), ("weekly", 11), ("monthly", 11)] {
        let snapshot = failed[window].as_object().unwrap();
        assert_eq!(snapshot.len(), size);
        assert!(snapshot.values().all(|v| v == 0));
    }

    assert_eq!(members[0]["current"]["attackswon"], 10);
    assert_eq!(members[2]["current"]["attackswon"], 30);
    assert_eq!(members[2]["monthly"]["attackswon"], 9);
}

#[tokio::test]
async fn test_empty_roster() {
    let upstream = StubUpstream::start(json!({"members": {}})).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server.post(ANALYZE, &AnalyzeBody::new("77")).await.unwrap();
    let text = response.text().await.unwrap();

    assert_eq!(text, r#"{"faction_id":"77","members":[]}"#);
    assert_eq!(upstream.requests().len(), 1);
}

#[tokio::test]
async fn test_profile_disabled() {
    let upstream = StubUpstream::start(roster_by_id(&[3])).await.unwrap();
    let server = TestServer::start_with(&upstream, &[("INCLUDE_PROFILE", "false")])
        .await
        .unwrap();

    let response = server.post(ANALYZE, &AnalyzeBody::new("5")).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    let member = &body["members"][0];
    assert!(member.get("age").is_none());
    assert!(member.get("faction_id").is_none());
    assert_eq!(upstream.requests()[1].query["selections"], "personalstats");
}

#[tokio::test]
async fn test_pacing_interval() {
    let upstream = StubUpstream::start(roster_by_id(&[1, 2, 3])).await.unwrap();
    let server = TestServer::start_with(&upstream, &[("PACING_INTERVAL_MS", "100")])
        .await
        .unwrap();

    let started = Instant::now();
    let response = server.post(ANALYZE, &AnalyzeBody::new("5")).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_request_deadline_returns_json_error() {
    let upstream = StubUpstream::start(roster_by_id(&[1, 2])).await.unwrap();
    let server = TestServer::start_with(
        &upstream,
        &[("PACING_INTERVAL_MS", "1500"), ("REQUEST_TIMEOUT_SECS", "1")],
    )
    .await
    .unwrap();

    let started = Instant::now();
    let response = server
        .post_from(ANALYZE, "https://stats.example", &AnalyzeBody::new("5"))
        .await
        .unwrap();

    assert!(started.elapsed() < Duration::from_millis(1500));
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(response.headers()["content-type"], "application/json");

    let body: Value = assert_json(response, StatusCode::SERVICE_UNAVAILABLE).await.unwrap();
    assert_eq!(body, json!({"error": "Request timed out"}));
}

// ============================================================================
// Input Tests
// ============================================================================

#[tokio::test]
async fn test_missing_fields() {
    let upstream = StubUpstream::start(roster_by_id(&[1])).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    for body in [
        json!({}),
        json!({"faction_id": "5"}),
        json!({"faction_id": "5", "api_key": "   "}),
    ] {
        let response = server.post(ANALYZE, &body).await.unwrap();
        let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
        assert_eq!(body, json!({"error": "Missing faction_id or api_key"}));
    }

    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn test_unparseable_body() {
    let upstream = StubUpstream::start(roster_by_id(&[1])).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server.post_raw(ANALYZE, "{\"faction_id\":").await.unwrap();
    let body: Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_trimmed_input() {
    let upstream = StubUpstream::start(roster_by_id(&[])).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let body = json!({"faction_id": "  12 ", "api_key": " test-key "});
    let response = server.post(ANALYZE, &body).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body["faction_id"], "12");
    assert_eq!(upstream.requests()[0].query["key"], TEST_API_KEY);
}

// ============================================================================
// CORS Tests
// ============================================================================

#[tokio::test]
async fn test_options_preflight() {
    let upstream = StubUpstream::start(roster_by_id(&[1])).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server.options(ANALYZE).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(body, json!({"status": "ok"}));
    assert!(upstream.requests().is_empty());
}

#[tokio::test]
async fn test_any_origin_allowed_by_default() {
    let upstream = StubUpstream::start(roster_by_id(&[])).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server
        .post_from(ANALYZE, "https://stats.example", &AnalyzeBody::new("5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_error_responses_carry_cors() {
    let upstream = StubUpstream::start(roster_by_id(&[])).await.unwrap();
    let server = TestServer::start(&upstream).await.unwrap();

    let response = server
        .post_from(ANALYZE, "https://stats.example", &json!({}))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}

#[tokio::test]
async fn test_configured_origins() {
    let upstream = StubUpstream::start(roster_by_id(&[])).await.unwrap();
    let server = TestServer::start_with(
        &upstream,
        &[("CORS_ALLOWED_ORIGINS", "https://stats.example")],
    )
    .await
    .unwrap();

    let allowed = server
        .post_from(ANALYZE, "https://stats.example", &AnalyzeBody::new("5"))
        .await
        .unwrap();
    assert_eq!(
        allowed.headers()["access-control-allow-origin"],
        "https://stats.example"
    );

    let other = server
        .post_from(ANALYZE, "https://elsewhere.example", &AnalyzeBody::new("5"))
        .await
        .unwrap();
    assert!(other.headers().get("access-control-allow-origin").is_none());
}

// ============================================================================
// Static Front-end Tests
// ============================================================================

#[tokio::test]
async fn test_static_dir_served() {
    let dir = std::env::temp_dir().join(format!("faction-stats-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>Faction stats</h1>").unwrap();

    let upstream = StubUpstream::start(roster_by_id(&[])).await.unwrap();
    let server = TestServer::start_with(&upstream, &[("STATIC_DIR", dir.to_str().unwrap())])
        .await
        .unwrap();

    let page = server.get("/").await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    assert_eq!(page.text().await.unwrap(), "<h1>Faction stats</h1>");

    let missing = server.get("/nope.js").await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let health = server.get("/health").await.unwrap();
    assert_status(health, StatusCode::OK).await.unwrap();

    std::fs::remove_dir_all(&dir).ok();
}
