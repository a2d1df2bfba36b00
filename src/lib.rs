pub mod auth;
pub mod clock;
pub mod command;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod ratelimit;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Builds the full application router around the given state.
///
/// Middleware order, outside-in: trace, CORS, rate limiting, then routing.
/// The session gate wraps only the protected subtree, so registration and
/// login stay reachable without a cookie (but still rate limited).
pub fn app(state: AppState) -> Router {
    use crate::handlers::protected::{expenses, users};
    use crate::handlers::public::auth as public_auth;

    let protected = Router::new()
        .route("/api/users/:user_id", get(users::profile_get))
        .route(
            "/api/users/:user_id/expenses",
            get(expenses::list_get).post(expenses::create_post),
        )
        .route(
            "/api/users/:user_id/expenses/:expense_id",
            get(expenses::record_get)
                .put(expenses::record_put)
                .delete(expenses::record_delete),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_auth_middleware,
        ));

    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/auth/register", post(public_auth::register_post))
        .route("/auth/login", post(public_auth::login_post))
        .merge(protected)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit_middleware,
        ))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
