use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::require_owner;
use crate::clock::Clock;
use crate::database::models::Expense;
use crate::database::ExpenseRepository;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct CreateExpense {
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    /// Defaults to the current instant when omitted.
    pub spent_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateExpense {
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<Decimal>,
    pub spent_at: Option<DateTime<Utc>>,
}

fn validate_amount(amount: Decimal) -> Result<(), ApiError> {
    if amount <= Decimal::ZERO {
        return Err(ApiError::bad_request("Amount must be positive"));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), ApiError> {
    if description.trim().is_empty() {
        return Err(ApiError::bad_request("Description cannot be empty"));
    }
    Ok(())
}

/// Records a new expense owned by `owner`.
pub async fn create(
    expenses: &dyn ExpenseRepository,
    clock: &dyn Clock,
    owner: Uuid,
    input: CreateExpense,
) -> Result<Expense, ApiError> {
    validate_description(&input.description)?;
    validate_amount(input.amount)?;

    let now = clock.now_utc();
    let expense = Expense {
        id: Uuid::new_v4(),
        user_id: owner,
        description: input.description,
        category: input.category,
        amount: input.amount,
        spent_at: input.spent_at.unwrap_or(now),
        created_at: now,
        updated_at: now,
    };
    expenses.insert(&expense).await?;

    tracing::debug!(expense_id = %expense.id, user_id = %owner, "recorded expense");
    Ok(expense)
}

/// Applies a partial update. The record's stored owner must match `subject`
/// even though the route was already ownership-checked: the expense id in
/// the path can point at another user's record.
pub async fn update(
    expenses: &dyn ExpenseRepository,
    clock: &dyn Clock,
    subject: Uuid,
    expense_id: Uuid,
    input: UpdateExpense,
) -> Result<Expense, ApiError> {
    let mut expense = expenses
        .find_by_id(expense_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Expense not found"))?;
    require_owner(subject, expense.user_id)?;

    if let Some(description) = input.description {
        validate_description(&description)?;
        expense.description = description;
    }
    if let Some(category) = input.category {
        expense.category = category;
    }
    if let Some(amount) = input.amount {
        validate_amount(amount)?;
        expense.amount = amount;
    }
    if let Some(spent_at) = input.spent_at {
        expense.spent_at = spent_at;
    }
    expense.updated_at = clock.now_utc();

    expenses.update(&expense).await?;
    Ok(expense)
}

/// Removes an expense after checking the stored owner.
pub async fn delete(
    expenses: &dyn ExpenseRepository,
    subject: Uuid,
    expense_id: Uuid,
) -> Result<(), ApiError> {
    let expense = expenses
        .find_by_id(expense_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Expense not found"))?;
    require_owner(subject, expense.user_id)?;

    expenses.delete(expense_id).await?;
    Ok(())
}
