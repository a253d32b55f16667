use sqlx::PgPool;

use crate::error::{AppError, Result};
use crate::models::{NewUser, User};

/// All users, oldest account first
pub async fn fetch_users(pool: &PgPool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT user_id, username, name FROM users ORDER BY user_id",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Look a user up by username
pub async fn fetch_user_by_username(pool: &PgPool, username: &str) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT user_id, username, name FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::UserNotFound)
}

/// Look a user up by surrogate id
pub async fn fetch_user_by_id(pool: &PgPool, user_id: i32) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT user_id, username, name FROM users WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::UserNotFound)
}

/// Insert a new user.
///
/// The unique constraint on `username` decides duplicates in the same
/// statement as the insert, so two concurrent requests for one name cannot
/// both succeed. A conflict returns no row and becomes a validation error.
pub async fn insert_user(pool: &PgPool, user: &NewUser) -> Result<User> {
    let inserted = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, name)
        VALUES ($1, $2)
        ON CONFLICT (username) DO NOTHING
        RETURNING user_id, username, name
        "#,
    )
    .bind(&user.username)
    .bind(&user.name)
    .fetch_optional(pool)
    .await?;

    inserted.ok_or_else(|| {
        AppError::validation(format!("username already exists: {}", user.username))
    })
}
