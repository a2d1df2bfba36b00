use axum::extract::{Extension, Json, Path, State};
use uuid::Uuid;

use crate::auth::require_owner;
use crate::command;
use crate::command::expense::{CreateExpense, UpdateExpense};
use crate::database::models::Expense;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::query;
use crate::state::AppState;

/// GET /api/users/:user_id/expenses
pub async fn list_get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<Vec<Expense>> {
    require_owner(current.id, user_id)?;

    let expenses = query::expense::list(state.expenses.as_ref(), user_id).await?;
    Ok(ApiResponse::success(expenses))
}

/// POST /api/users/:user_id/expenses
pub async fn create_post(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
    Json(input): Json<CreateExpense>,
) -> ApiResult<Expense> {
    require_owner(current.id, user_id)?;

    let expense =
        command::expense::create(state.expenses.as_ref(), state.clock.as_ref(), user_id, input)
            .await?;
    Ok(ApiResponse::created(expense))
}

/// GET /api/users/:user_id/expenses/:expense_id
pub async fn record_get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((user_id, expense_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Expense> {
    require_owner(current.id, user_id)?;

    let expense = query::expense::get(state.expenses.as_ref(), current.id, expense_id).await?;
    Ok(ApiResponse::success(expense))
}

/// PUT /api/users/:user_id/expenses/:expense_id
pub async fn record_put(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((user_id, expense_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<UpdateExpense>,
) -> ApiResult<Expense> {
    require_owner(current.id, user_id)?;

    let expense = command::expense::update(
        state.expenses.as_ref(),
        state.clock.as_ref(),
        current.id,
        expense_id,
        input,
    )
    .await?;
    Ok(ApiResponse::success(expense))
}

/// DELETE /api/users/:user_id/expenses/:expense_id
pub async fn record_delete(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path((user_id, expense_id)): Path<(Uuid, Uuid)>,
) -> ApiResult<()> {
    require_owner(current.id, user_id)?;

    command::expense::delete(state.expenses.as_ref(), current.id, expense_id).await?;
    Ok(ApiResponse::<()>::no_content())
}
