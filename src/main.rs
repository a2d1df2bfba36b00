use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use fintrack_api::auth::{SaltedSha256Hasher, TokenService};
use fintrack_api::clock::SystemClock;
use fintrack_api::database::memory::{InMemoryExpenseRepository, InMemoryUserRepository};
use fintrack_api::database::postgres::{PgExpenseRepository, PgUserRepository};
use fintrack_api::database::{ExpenseRepository, UserRepository};
use fintrack_api::ratelimit::{spawn_sweeper, RateLimiterConfig, RateLimiterRegistry};
use fintrack_api::state::AppState;
use fintrack_api::{app, config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fintrack_api=debug,tower_http=info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("starting Fintrack API in {:?} mode", config.environment);

    let clock = Arc::new(SystemClock);

    let tokens = Arc::new(TokenService::new(
        &config.security.jwt_secret,
        config.security.jwt_issuer.clone(),
        chrono::Duration::seconds(config.security.jwt_ttl_secs),
        clock.clone(),
    ));

    let limiter = Arc::new(RateLimiterRegistry::new(
        RateLimiterConfig {
            capacity: config.api.rate_limit_capacity,
            refill_per_sec: config.api.rate_limit_refill_per_sec,
            idle_timeout: Duration::from_secs(config.api.rate_limit_idle_secs),
        },
        clock.clone(),
    ));
    // Runs for the process lifetime; the handle is kept so a future graceful
    // shutdown path can stop it.
    let _sweeper = spawn_sweeper(limiter.clone());

    let (users, expenses): (Arc<dyn UserRepository>, Arc<dyn ExpenseRepository>) =
        match std::env::var("DATABASE_URL") {
            Ok(url) => {
                let pool = fintrack_api::database::connect(&url, &config.database)
                    .await
                    .context("failed to connect to database")?;
                tracing::info!("connected to postgres");
                (
                    Arc::new(PgUserRepository::new(pool.clone())),
                    Arc::new(PgExpenseRepository::new(pool)),
                )
            }
            Err(_) => {
                tracing::warn!("DATABASE_URL not set, using in-memory storage");
                (
                    Arc::new(InMemoryUserRepository::new()),
                    Arc::new(InMemoryExpenseRepository::new()),
                )
            }
        };

    let state = AppState {
        clock,
        tokens,
        limiter,
        hasher: Arc::new(SaltedSha256Hasher),
        users,
        expenses,
        session_cookie: config.security.session_cookie.clone(),
        trust_forwarded_for: config.api.trust_forwarded_for,
    };

    let router = app(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);
    let bind_addr = format!("0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("server error")?;

    Ok(())
}
