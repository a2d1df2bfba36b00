use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated identity attached to the request once the session cookie
/// has been verified. Downstream handlers read this from the request
/// extensions and never re-verify the token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub claims: Claims,
}

/// Authorization gate for protected routes.
///
/// Extracts the session token from the request's cookie and verifies it via
/// the token service. Missing cookie and failed verification produce the
/// same externally-visible error, so a caller cannot tell which occurred.
pub async fn session_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = session_token(&request, &state.session_cookie)
        .ok_or_else(|| ApiError::unauthorized("Authorization required"))?;

    let claims = state.tokens.verify(&token)?;
    let id = claims.subject_id()?;

    request.extensions_mut().insert(CurrentUser { id, claims });
    Ok(next.run(request).await)
}

/// Reads the session token from the `Cookie` header, if present.
fn session_token(request: &Request, cookie_name: &str) -> Option<String> {
    let header = request.headers().get(COOKIE)?.to_str().ok()?;

    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == cookie_name && !value.is_empty()).then(|| value.to_string())
    })
}

/// Builds the `Set-Cookie` value carrying a freshly issued session token.
/// HTTP-only so scripts never see the token; Max-Age matches the token TTL,
/// which is also the only way a session ends (no server-side revocation).
pub fn session_cookie_value(cookie_name: &str, token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Strict; Max-Age={}",
        cookie_name, token, max_age_secs
    )
}
