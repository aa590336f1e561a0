use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, errors::AppError, pagination::Pagination, state::AppState};

use super::dto::UserUpdate;
use super::repo::User;

#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = User::list(&state.db, p.limit, p.offset).await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".into()))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UserUpdate>,
) -> Result<Json<User>, AppError> {
    if acting != id {
        return Err(AppError::Forbidden);
    }
    let user = User::update(&state.db, id, &payload).await?;
    Ok(Json(user))
}
