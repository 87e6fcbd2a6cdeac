//! Handlers for the `/users` resource.
//!
//! Each handler validates (writes only), makes exactly one gateway call and
//! maps the outcome to a status and JSON body. Absence is a 404
//! `{ "message": "User not found" }`; storage failures are a 500 carrying the
//! gateway's prefixed message.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use users_core::error::CoreError;
use users_core::types::DbId;
use users_db::models::user::{User, UserPayload};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, JsonBody};
use crate::response::MessageResponse;
use crate::state::AppState;

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// GET /api/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<User>> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    Ok(Json(user))
}

/// POST /api/users
///
/// Validates the body before touching the store and returns 201 with the
/// created row.
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<UserPayload>,
) -> AppResult<(StatusCode, Json<User>)> {
    let input = payload.into_input()?;
    let user = state.users.create(&input).await?;

    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users/{id}
///
/// The body is validated against the full schema: name, email and role are
/// all required even though the row already exists.
pub async fn update_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<UserPayload>,
) -> AppResult<Json<User>> {
    let input = payload.into_input()?;
    let user = state
        .users
        .update(id, &input)
        .await?
        .ok_or_else(|| user_not_found(id))?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(user))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<MessageResponse>> {
    let deleted = state.users.delete(id).await?;

    if !deleted {
        return Err(user_not_found(id));
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
