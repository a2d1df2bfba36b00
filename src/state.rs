use std::sync::Arc;

use crate::auth::{PasswordHasher, TokenService};
use crate::clock::Clock;
use crate::database::{ExpenseRepository, UserRepository};
use crate::ratelimit::RateLimiterRegistry;

/// Shared application state injected into the router. Everything mutable
/// lives behind its own synchronization (the limiter registry's lock, the
/// repositories); the rest is immutable configuration.
#[derive(Clone)]
pub struct AppState {
    pub clock: Arc<dyn Clock>,
    pub tokens: Arc<TokenService>,
    pub limiter: Arc<RateLimiterRegistry>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub users: Arc<dyn UserRepository>,
    pub expenses: Arc<dyn ExpenseRepository>,
    /// Name of the HTTP-only cookie carrying the session token.
    pub session_cookie: String,
    /// Whether `X-Forwarded-For` names the rate-limit client. Only enable
    /// behind a proxy that strips the inbound header.
    pub trust_forwarded_for: bool,
}
