mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{send, test_app_with_limits};

async fn health_from(router: &axum::Router, client: &str) -> StatusCode {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-forwarded-for", client)
        .body(Body::empty())
        .unwrap();
    router.clone().oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn burst_is_capped_then_refills() {
    // Capacity 5, one token per 2 seconds
    let app = test_app_with_limits(5.0, 0.5);

    for _ in 0..5 {
        assert_eq!(health_from(&app.router, "1.2.3.4").await, StatusCode::OK);
    }
    assert_eq!(
        health_from(&app.router, "1.2.3.4").await,
        StatusCode::TOO_MANY_REQUESTS
    );

    app.clock.advance(chrono::Duration::seconds(2));
    assert_eq!(health_from(&app.router, "1.2.3.4").await, StatusCode::OK);
    assert_eq!(
        health_from(&app.router, "1.2.3.4").await,
        StatusCode::TOO_MANY_REQUESTS
    );
}

#[tokio::test]
async fn limits_are_per_client() {
    let app = test_app_with_limits(2.0, 0.0);

    assert_eq!(health_from(&app.router, "10.0.0.1").await, StatusCode::OK);
    assert_eq!(health_from(&app.router, "10.0.0.1").await, StatusCode::OK);
    assert_eq!(
        health_from(&app.router, "10.0.0.1").await,
        StatusCode::TOO_MANY_REQUESTS
    );

    // A different client is unaffected
    assert_eq!(health_from(&app.router, "10.0.0.2").await, StatusCode::OK);
}

#[tokio::test]
async fn denied_requests_never_reach_handlers() {
    let app = test_app_with_limits(1.0, 0.0);

    // Spend the only token, then confirm a would-be registration is refused
    // at admission and creates no account
    assert_eq!(health_from(&app.router, "8.8.8.8").await, StatusCode::OK);

    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .header("x-forwarded-for", "8.8.8.8")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({
                "email": "late@example.com",
                "username": "latecomer",
                "password": "correct horse battery",
            })
            .to_string(),
        ))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Fresh client key: login for that account fails because it was never made
    let (status, _, _) = send(
        &app.router,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "late@example.com", "password": "correct horse battery"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn denial_body_is_the_rate_limited_envelope() {
    let app = test_app_with_limits(1.0, 0.0);

    assert_eq!(health_from(&app.router, "7.7.7.7").await, StatusCode::OK);

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .header("x-forwarded-for", "7.7.7.7")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], json!("TOO_MANY_REQUESTS"));
    assert_eq!(body["error"], json!(true));
}
