//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycles, focusing on cache HIT/MISS behavior
//! and tenant invalidation.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tenant_cache::{
    api::{create_router, X_CACHE},
    cache::ManualClock,
    AppState, Config, TtlCache,
};
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> (Router, AppState, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));
    let cache = TtlCache::with_clock(300_000, clock.clone());
    let state = AppState::new(cache, Config::default());
    (create_router(state.clone()), state, clock)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

async fn record(app: &Router, tenant: &str, amount: f64, date: &str) -> Value {
    let response = send(
        app,
        "POST",
        &format!("/tenants/{tenant}/revenue"),
        Some(&format!(r#"{{"amount":{amount},"date":"{date}"}}"#)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_to_json(response.into_body()).await
}

fn cache_status(response: &Response<Body>) -> String {
    response.headers()[X_CACHE].to_str().unwrap().to_string()
}

// == Read-Through Caching ==

#[tokio::test]
async fn test_monthly_report_miss_then_hit() {
    let (app, _, _) = create_test_app();
    record(&app, "tenant42", 200.0, "2024-01-05").await;
    record(&app, "tenant42", 300.0, "2024-01-25").await;

    let uri = "/tenants/tenant42/reports/monthly/2024-01";
    let first = send(&app, "GET", uri, None).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(cache_status(&first), "MISS");
    let cache_control = first.headers()["cache-control"].to_str().unwrap().to_string();
    assert_eq!(cache_control, "private, max-age=300");

    let json = body_to_json(first.into_body()).await;
    assert_eq!(json["total"].as_f64().unwrap(), 500.0);
    assert_eq!(json["entries"].as_u64().unwrap(), 2);

    let second = send(&app, "GET", uri, None).await;
    assert_eq!(cache_status(&second), "HIT");
    let cached = body_to_json(second.into_body()).await;
    assert_eq!(cached, json);
}

#[tokio::test]
async fn test_mutation_invalidates_only_that_tenant() {
    let (app, _, _) = create_test_app();
    record(&app, "acme", 100.0, "2024-01-05").await;
    record(&app, "globex", 40.0, "2024-01-05").await;

    let acme = "/tenants/acme/reports/monthly/2024-01";
    let globex = "/tenants/globex/reports/monthly/2024-01";
    send(&app, "GET", acme, None).await;
    send(&app, "GET", globex, None).await;

    let written = record(&app, "acme", 50.0, "2024-01-06").await;
    assert_eq!(written["invalidated"].as_u64().unwrap(), 1);

    let acme_after = send(&app, "GET", acme, None).await;
    assert_eq!(cache_status(&acme_after), "MISS");
    let json = body_to_json(acme_after.into_body()).await;
    assert_eq!(json["total"].as_f64().unwrap(), 150.0);

    let globex_after = send(&app, "GET", globex, None).await;
    assert_eq!(cache_status(&globex_after), "HIT");
}

#[tokio::test]
async fn test_mutation_invalidates_forecast_and_reports_together() {
    let (app, state, _) = create_test_app();
    for (month, amount) in [("01", 100.0), ("02", 110.0), ("03", 120.0)] {
        record(&app, "acme", amount, &format!("2024-{month}-01")).await;
    }

    send(&app, "GET", "/tenants/acme/forecast?periods=2", None).await;
    send(&app, "GET", "/tenants/acme/reports/monthly/2024-02", None).await;
    assert_eq!(state.cache.read().await.len(), 2);

    let written = record(&app, "acme", 130.0, "2024-04-01").await;
    assert_eq!(written["invalidated"].as_u64().unwrap(), 2);
    assert!(state.cache.read().await.is_empty());

    let forecast = send(&app, "GET", "/tenants/acme/forecast?periods=2", None).await;
    assert_eq!(cache_status(&forecast), "MISS");
    let json = body_to_json(forecast.into_body()).await;
    assert_eq!(json["history"].as_array().unwrap().len(), 4);
    assert_eq!(json["forecast"]["forecasts"][0]["value"].as_f64().unwrap(), 140.0);
}

#[tokio::test]
async fn test_cached_entry_expires_after_ttl() {
    let (app, _, clock) = create_test_app();
    record(&app, "acme", 10.0, "2024-03-01").await;

    let uri = "/tenants/acme/reports/monthly/2024-03";
    send(&app, "GET", uri, None).await;
    assert_eq!(cache_status(&send(&app, "GET", uri, None).await), "HIT");

    clock.advance(Duration::from_millis(300_000));

    assert_eq!(cache_status(&send(&app, "GET", uri, None).await), "MISS");
}

#[tokio::test]
async fn test_forecast_periods_are_cached_separately() {
    let (app, _, _) = create_test_app();
    for (month, amount) in [("01", 10.0), ("02", 20.0), ("03", 30.0)] {
        record(&app, "acme", amount, &format!("2024-{month}-15")).await;
    }

    let three = send(&app, "GET", "/tenants/acme/forecast", None).await;
    assert_eq!(cache_status(&three), "MISS");
    let json = body_to_json(three.into_body()).await;
    assert_eq!(json["forecast"]["forecasts"].as_array().unwrap().len(), 3);

    let six = send(&app, "GET", "/tenants/acme/forecast?periods=6", None).await;
    assert_eq!(cache_status(&six), "MISS");

    let three_again = send(&app, "GET", "/tenants/acme/forecast?periods=3", None).await;
    assert_eq!(cache_status(&three_again), "HIT");
}

// == Cache Administration ==

#[tokio::test]
async fn test_delete_cache_by_pattern_and_full_flush() {
    let (app, state, _) = create_test_app();
    record(&app, "acme", 1.0, "2024-01-01").await;
    record(&app, "globex", 1.0, "2024-01-01").await;
    send(&app, "GET", "/tenants/acme/reports/monthly/2024-01", None).await;
    send(&app, "GET", "/tenants/globex/reports/monthly/2024-01", None).await;

    let response = send(&app, "DELETE", "/cache?pattern=globex", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"].as_u64().unwrap(), 1);
    assert_eq!(json["pattern"].as_str().unwrap(), "globex");
    assert_eq!(state.cache.read().await.len(), 1);

    let response = send(&app, "DELETE", "/cache", None).await;
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["removed"].as_u64().unwrap(), 1);
    assert!(json["pattern"].is_null());
    assert!(state.cache.read().await.is_empty());
}

#[tokio::test]
async fn test_substring_invalidation_reaches_overlapping_tenant_ids() {
    let (app, _, _) = create_test_app();
    record(&app, "tenant4", 1.0, "2024-01-01").await;
    record(&app, "tenant42", 1.0, "2024-01-01").await;
    send(&app, "GET", "/tenants/tenant42/reports/monthly/2024-01", None).await;

    // "tenant4" is a substring of every "tenant42" key
    let written = record(&app, "tenant4", 1.0, "2024-01-02").await;
    assert_eq!(written["invalidated"].as_u64().unwrap(), 1);

    let after = send(&app, "GET", "/tenants/tenant42/reports/monthly/2024-01", None).await;
    assert_eq!(cache_status(&after), "MISS");
}

#[tokio::test]
async fn test_stats_endpoint() {
    let (app, _, _) = create_test_app();
    record(&app, "acme", 5.0, "2024-01-01").await;

    let uri = "/tenants/acme/reports/monthly/2024-01";
    send(&app, "GET", uri, None).await; // miss
    send(&app, "GET", uri, None).await; // hit

    let response = send(&app, "GET", "/stats", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;

    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert_eq!(json["hit_rate"].as_f64().unwrap(), 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _, _) = create_test_app();

    let response = send(&app, "GET", "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Responses ==

#[tokio::test]
async fn test_invalid_json_request() {
    let (app, _, _) = create_test_app();

    let response = send(&app, "POST", "/tenants/acme/revenue", Some(r#"{"amount"#)).await;

    // Axum rejects malformed JSON before the handler runs
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_negative_amount_request() {
    let (app, _, _) = create_test_app();

    let response = send(&app, "POST", "/tenants/acme/revenue", Some(r#"{"amount":-3}"#)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_date_outside_four_digit_years_is_rejected() {
    let (app, state, _) = create_test_app();

    for date in ["-200000-01-01", "+200000-01-01"] {
        let body = format!(r#"{{"amount":1,"date":"{date}"}}"#);
        let response = send(&app, "POST", "/tenants/acme/revenue", Some(&body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{date}");
        let json = body_to_json(response.into_body()).await;
        assert!(json["error"].as_str().unwrap().contains("9999"));
    }
    assert!(state.ledger.read().await.entries("acme").is_empty());

    let response = send(&app, "GET", "/tenants/acme/forecast", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_forecast_unknown_tenant() {
    let (app, _, _) = create_test_app();

    let response = send(&app, "GET", "/tenants/ghost/forecast", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(X_CACHE).is_none());
}
