#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use fintrack_api::app;
use fintrack_api::auth::{SaltedSha256Hasher, TokenService};
use fintrack_api::clock::ManualClock;
use fintrack_api::database::memory::{InMemoryExpenseRepository, InMemoryUserRepository};
use fintrack_api::ratelimit::{RateLimiterConfig, RateLimiterRegistry};
use fintrack_api::state::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<ManualClock>,
    pub tokens: Arc<TokenService>,
}

/// App with limits high enough that rate limiting never interferes.
pub fn test_app() -> TestApp {
    test_app_with_limits(10_000.0, 1_000.0)
}

/// In-process app over in-memory repositories with a manual clock, so tests
/// control both rate-limiter refill and token expiry.
pub fn test_app_with_limits(capacity: f64, refill_per_sec: f64) -> TestApp {
    let clock = Arc::new(ManualClock::new(Utc::now()));

    let tokens = Arc::new(TokenService::new(
        TEST_SECRET,
        "fintrack-api",
        chrono::Duration::hours(4),
        clock.clone(),
    ));

    let limiter = Arc::new(RateLimiterRegistry::new(
        RateLimiterConfig {
            capacity,
            refill_per_sec,
            idle_timeout: Duration::from_secs(600),
        },
        clock.clone(),
    ));

    let state = AppState {
        clock: clock.clone(),
        tokens: tokens.clone(),
        limiter,
        hasher: Arc::new(SaltedSha256Hasher),
        users: Arc::new(InMemoryUserRepository::new()),
        expenses: Arc::new(InMemoryExpenseRepository::new()),
        session_cookie: "session".to_string(),
        // Tests address clients through the forwarded header
        trust_forwarded_for: true,
    };

    TestApp {
        router: app(state),
        clock,
        tokens,
    }
}

/// Sends one request and returns (status, headers, parsed body). The body is
/// `Value::Null` for empty responses.
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, headers, value)
}

/// Extracts the `session=<token>` pair from a Set-Cookie header, in the form
/// a client would echo back in a Cookie header.
pub fn session_cookie(headers: &HeaderMap) -> String {
    let set_cookie = headers
        .get(header::SET_COOKIE)
        .expect("response missing Set-Cookie")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .expect("malformed Set-Cookie")
        .to_string()
}

/// Registers an account and returns (user_id, session cookie pair).
pub async fn register_user(router: &Router, email: &str, username: &str) -> (String, String) {
    let (status, headers, body) = send(
        router,
        "POST",
        "/auth/register",
        None,
        Some(serde_json::json!({
            "email": email,
            "username": username,
            "password": "correct horse battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);

    let user_id = body["data"]["id"].as_str().unwrap().to_string();
    (user_id, session_cookie(&headers))
}
