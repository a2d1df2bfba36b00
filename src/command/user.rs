use serde::Deserialize;
use uuid::Uuid;

use crate::auth::PasswordHasher;
use crate::clock::Clock;
use crate::database::models::User;
use crate::database::UserRepository;
use crate::error::ApiError;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// Creates a new account. Email and username must be unused; the password is
/// stored only as a digest.
pub async fn register(
    users: &dyn UserRepository,
    hasher: &dyn PasswordHasher,
    clock: &dyn Clock,
    input: RegisterUser,
) -> Result<User, ApiError> {
    validate_email(&input.email)?;
    validate_username(&input.username)?;
    if input.password.len() < MIN_PASSWORD_LENGTH {
        return Err(ApiError::bad_request(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if users.find_by_email(&input.email).await?.is_some()
        || users.find_by_username(&input.username).await?.is_some()
    {
        return Err(ApiError::conflict("A user with that email or username already exists"));
    }

    let now = clock.now_utc();
    let user = User {
        id: Uuid::new_v4(),
        email: input.email,
        username: input.username,
        password_hash: hasher.hash(&input.password),
        created_at: now,
        updated_at: now,
    };
    users.insert(&user).await?;

    tracing::info!(user_id = %user.id, "registered new user");
    Ok(user)
}

/// Checks credentials and returns the account. Unknown email and wrong
/// password produce the identical error so the response leaks nothing about
/// which accounts exist.
pub async fn login(
    users: &dyn UserRepository,
    hasher: &dyn PasswordHasher,
    input: LoginUser,
) -> Result<User, ApiError> {
    let user = users
        .find_by_email(&input.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    if !hasher.matches(&user.password_hash, &input.password) {
        return Err(invalid_credentials());
    }

    tracing::debug!(user_id = %user.id, "login succeeded");
    Ok(user)
}

fn invalid_credentials() -> ApiError {
    ApiError::unauthorized("Invalid credentials")
}

fn validate_email(email: &str) -> Result<(), ApiError> {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || !parts[1].contains('.') {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<(), ApiError> {
    if username.len() < 3 || username.len() > 50 {
        return Err(ApiError::bad_request("Username must be between 3 and 50 characters"));
    }
    if !username.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-') {
        return Err(ApiError::bad_request(
            "Username can only contain letters, numbers, underscore, and hyphen",
        ));
    }
    Ok(())
}
