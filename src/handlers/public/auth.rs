use axum::{
    extract::{Json, State},
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::command;
use crate::command::user::{LoginUser, RegisterUser};
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::auth::session_cookie_value;
use crate::middleware::ApiResponse;
use crate::query::user::UserProfile;
use crate::state::AppState;

/// POST /auth/register - create an account and start a session.
pub async fn register_post(
    State(state): State<AppState>,
    Json(input): Json<RegisterUser>,
) -> Result<Response, ApiError> {
    let user = command::user::register(
        state.users.as_ref(),
        state.hasher.as_ref(),
        state.clock.as_ref(),
        input,
    )
    .await?;

    session_response(&state, user, StatusCode::CREATED)
}

/// POST /auth/login - authenticate and start a session.
pub async fn login_post(
    State(state): State<AppState>,
    Json(input): Json<LoginUser>,
) -> Result<Response, ApiError> {
    let user = command::user::login(state.users.as_ref(), state.hasher.as_ref(), input).await?;

    session_response(&state, user, StatusCode::OK)
}

/// Issues a session token for `user` and attaches it as an HTTP-only cookie
/// on the profile response.
fn session_response(state: &AppState, user: User, status: StatusCode) -> Result<Response, ApiError> {
    let token = state.tokens.issue(user.id, state.clock.now_utc())?;
    let cookie = session_cookie_value(
        &state.session_cookie,
        &token,
        state.tokens.ttl().num_seconds(),
    );
    let cookie = HeaderValue::from_str(&cookie).map_err(|_| {
        tracing::error!("session cookie contained invalid header characters");
        ApiError::internal_server_error("An error occurred while processing your request")
    })?;

    let profile: UserProfile = user.into();
    let mut response = ApiResponse::with_status(profile, status).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
