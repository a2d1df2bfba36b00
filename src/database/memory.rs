//! In-memory repositories, used when no `DATABASE_URL` is configured and by
//! the integration tests. Same contract as the Postgres implementations,
//! including duplicate detection.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::database::models::{Expense, User};
use crate::database::repository::{ExpenseRepository, RepositoryError, UserRepository};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write();

        let taken = users
            .values()
            .any(|u| u.email == user.email || u.username == user.username);
        if taken {
            return Err(RepositoryError::Duplicate(
                "A user with that email or username already exists".to_string(),
            ));
        }

        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.read().values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[derive(Default)]
pub struct InMemoryExpenseRepository {
    expenses: RwLock<HashMap<Uuid, Expense>>,
}

impl InMemoryExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExpenseRepository for InMemoryExpenseRepository {
    async fn insert(&self, expense: &Expense) -> Result<(), RepositoryError> {
        let mut expenses = self.expenses.write();
        if expenses.contains_key(&expense.id) {
            return Err(RepositoryError::Duplicate(
                "An expense with that id already exists".to_string(),
            ));
        }
        expenses.insert(expense.id, expense.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Expense>, RepositoryError> {
        Ok(self.expenses.read().get(&id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Expense>, RepositoryError> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .read()
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.spent_at.cmp(&a.spent_at));
        Ok(expenses)
    }

    async fn update(&self, expense: &Expense) -> Result<(), RepositoryError> {
        self.expenses.write().insert(expense.id, expense.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.expenses.write().remove(&id).is_some())
    }
}
