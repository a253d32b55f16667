use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::db::users;
use crate::error::Result;
use crate::models::{NewUserRequest, User};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user: User,
}

/// List every user
pub async fn list_users(State(state): State<AppState>) -> Result<Json<UsersResponse>> {
    let users = users::fetch_users(&state.pool).await?;
    Ok(Json(UsersResponse { users }))
}

/// Create a user
///
/// Both `username` and `name` are required. A username that is already
/// taken is a bad request, indistinguishable to the client from a missing
/// field.
pub async fn create_user(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let Json(payload) = payload?;
    let new_user = payload.validate()?;

    let user = users::insert_user(&state.pool, &new_user).await?;

    tracing::info!("New user created: {} ({})", user.username, user.user_id);

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}

/// Look a user up by username
pub async fn get_user(
    State(state): State<AppState>,
    username: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<UserResponse>> {
    let Path(username) = username?;
    let user = users::fetch_user_by_username(&state.pool, &username).await?;
    Ok(Json(UserResponse { user }))
}
