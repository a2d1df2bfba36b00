// Two security tiers: public (no auth, /auth/*) and protected (session
// cookie required, /api/*). The rate limiter fronts both.
pub mod protected;
pub mod public;

use axum::response::Json;
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};

pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Fintrack API",
            "version": version,
            "endpoints": {
                "register": "POST /auth/register (public)",
                "login": "POST /auth/login (public)",
                "profile": "GET /api/users/:user_id (protected)",
                "expenses": "/api/users/:user_id/expenses[/:expense_id] (protected)",
            }
        }
    }))
}

pub async fn health() -> ApiResult<Value> {
    Ok(ApiResponse::success(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now(),
    })))
}
