mod common;

use axum::http::StatusCode;
use fintrack_api::clock::Clock;
use serde_json::json;
use uuid::Uuid;

use common::{register_user, send, session_cookie, test_app};

#[tokio::test]
async fn register_sets_session_cookie_and_returns_profile() {
    let app = test_app();

    let (status, headers, body) = send(
        &app.router,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "email": "alice@example.com",
            "username": "alice",
            "password": "correct horse battery",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["email"], json!("alice@example.com"));
    assert!(body["data"].get("password_hash").is_none());

    let set_cookie = headers
        .get(axum::http::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("session="));
    assert!(set_cookie.contains("HttpOnly"));

    // Cookie subject matches the returned user id
    let token = set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim_start_matches("session=");
    let claims = app.tokens.verify(token).unwrap();
    assert_eq!(claims.sub, body["data"]["id"].as_str().unwrap());
}

#[tokio::test]
async fn login_roundtrip_reaches_protected_profile() {
    let app = test_app();
    let (user_id, _) = register_user(&app.router, "bob@example.com", "bob").await;

    let (status, headers, _) = send(
        &app.router,
        "POST",
        "/auth/login",
        None,
        Some(json!({
            "email": "bob@example.com",
            "password": "correct horse battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let cookie = session_cookie(&headers);
    let (status, _, body) = send(
        &app.router,
        "GET",
        &format!("/api/users/{}", user_id),
        Some(&cookie),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], json!("bob"));
}

#[tokio::test]
async fn bad_credentials_are_opaque() {
    let app = test_app();
    register_user(&app.router, "carol@example.com", "carol").await;

    let wrong_password = send(
        &app.router,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "carol@example.com", "password": "nope-nope-nope"})),
    )
    .await;
    let unknown_email = send(
        &app.router,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": "ghost@example.com", "password": "nope-nope-nope"})),
    )
    .await;

    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.2["message"], unknown_email.2["message"]);
}

#[tokio::test]
async fn protected_route_requires_cookie() {
    let app = test_app();
    let (user_id, cookie) = register_user(&app.router, "dave@example.com", "dave").await;
    let uri = format!("/api/users/{}", user_id);

    // No cookie
    let (status, _, body) = send(&app.router, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let no_cookie_message = body["message"].clone();

    // Garbage token: same externally-visible error
    let (status, _, body) = send(&app.router, "GET", &uri, Some("session=garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], no_cookie_message);

    // Tampered signature
    let token = cookie.trim_start_matches("session=");
    let mut tampered = token.to_string();
    tampered.pop();
    tampered.push(if token.ends_with('A') { 'B' } else { 'A' });
    let (status, _, _) = send(
        &app.router,
        "GET",
        &uri,
        Some(&format!("session={}", tampered)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_session_is_rejected() {
    let app = test_app();
    let (user_id, cookie) = register_user(&app.router, "erin@example.com", "erin").await;
    let uri = format!("/api/users/{}", user_id);

    let (status, _, _) = send(&app.router, "GET", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    // Token TTL is 4 hours
    app.clock.advance(chrono::Duration::hours(5));
    let (status, _, _) = send(&app.router, "GET", &uri, Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_of_another_user_is_forbidden() {
    let app = test_app();
    let (_, cookie_a) = register_user(&app.router, "a@example.com", "usera").await;
    let (user_b, _) = register_user(&app.router, "b@example.com", "userb").await;

    let (status, _, body) = send(
        &app.router,
        "GET",
        &format!("/api/users/{}", user_b),
        Some(&cookie_a),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], serde_json::json!("FORBIDDEN"));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = test_app();
    register_user(&app.router, "frank@example.com", "frank").await;

    let (status, _, _) = send(
        &app.router,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "email": "frank@example.com",
            "username": "frank2",
            "password": "correct horse battery",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_profile_for_own_id_is_not_found() {
    // A valid token whose subject no longer resolves: forge via the service
    let app = test_app();
    let ghost = Uuid::new_v4();
    let token = app.tokens.issue(ghost, app.clock.now_utc()).unwrap();

    let (status, _, _) = send(
        &app.router,
        "GET",
        &format!("/api/users/{}", ghost),
        Some(&format!("session={}", token)),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
