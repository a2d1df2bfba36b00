use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Admission control, keyed by client address. Runs before authentication:
/// a denied request never reaches the token service or a handler.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = client_key(&request, state.trust_forwarded_for);

    if !state.limiter.allow(&key) {
        tracing::debug!(client = %key, "rate limit exceeded");
        return Err(ApiError::too_many_requests("Rate limit exceeded, retry later"));
    }

    Ok(next.run(request).await)
}

/// Client identity for rate limiting: the first `X-Forwarded-For` hop when
/// header trust is enabled, otherwise the peer address.
///
/// Header trust must stay off unless a fronting proxy strips the inbound
/// header; a direct client that controls `X-Forwarded-For` would otherwise
/// mint a fresh bucket per request.
fn client_key(request: &Request, trust_forwarded_for: bool) -> String {
    if trust_forwarded_for {
        if let Some(forwarded) = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
        {
            if let Some(first) = forwarded.split(',').next() {
                let first = first.trim();
                if !first.is_empty() {
                    return first.to_string();
                }
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
