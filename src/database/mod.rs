pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;

pub use repository::{ExpenseRepository, RepositoryError, UserRepository};

/// Connects the Postgres pool from `DATABASE_URL`. Schema management is
/// handled outside this service.
pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(url)
        .await
}
