use async_trait::async_trait;
use uuid::Uuid;

use crate::database::models::{Expense, User};

/// Persistence failure surfaced to command/query handlers. Uniqueness
/// violations get their own variant so the boundary can answer 409 without
/// pattern-matching on driver error codes.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Duplicate(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
}

#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    async fn insert(&self, expense: &Expense) -> Result<(), RepositoryError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, RepositoryError>;
    /// Newest first by `spent_at`.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Expense>, RepositoryError>;
    async fn update(&self, expense: &Expense) -> Result<(), RepositoryError>;
    /// Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError>;
}
