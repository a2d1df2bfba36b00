use serde::Serialize;
use uuid::Uuid;

use crate::database::models::User;
use crate::database::UserRepository;
use crate::error::ApiError;

/// Client-facing view of an account. The password digest never leaves the
/// repository layer.
#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

pub async fn profile(users: &dyn UserRepository, id: Uuid) -> Result<UserProfile, ApiError> {
    let user = users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(user.into())
}
