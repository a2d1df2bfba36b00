use axum::extract::{Extension, Path, State};
use uuid::Uuid;

use crate::auth::require_owner;
use crate::middleware::{ApiResponse, ApiResult, CurrentUser};
use crate::query;
use crate::query::user::UserProfile;
use crate::state::AppState;

/// GET /api/users/:user_id - own profile only.
pub async fn profile_get(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(user_id): Path<Uuid>,
) -> ApiResult<UserProfile> {
    require_owner(current.id, user_id)?;

    let profile = query::user::profile(state.users.as_ref(), user_id).await?;
    Ok(ApiResponse::success(profile))
}
