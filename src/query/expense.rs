use uuid::Uuid;

use crate::auth::require_owner;
use crate::database::models::Expense;
use crate::database::ExpenseRepository;
use crate::error::ApiError;

/// Fetches a single expense, enforcing that the stored owner matches the
/// authenticated subject.
pub async fn get(
    expenses: &dyn ExpenseRepository,
    subject: Uuid,
    expense_id: Uuid,
) -> Result<Expense, ApiError> {
    let expense = expenses
        .find_by_id(expense_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Expense not found"))?;
    require_owner(subject, expense.user_id)?;
    Ok(expense)
}

/// All expenses for a user, newest first.
pub async fn list(
    expenses: &dyn ExpenseRepository,
    user_id: Uuid,
) -> Result<Vec<Expense>, ApiError> {
    Ok(expenses.list_for_user(user_id).await?)
}
