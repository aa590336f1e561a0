use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, errors::AppError, pagination::Pagination, state::AppState};

use super::dto::{ResumeCreate, ResumeFilter, ResumeUpdate};
use super::repo::Resume;

#[instrument(skip(state, payload))]
pub async fn create_resume(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ResumeCreate>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    // Unique user_id index turns a second resume into a conflict
    let resume = Resume::create(&state.db, user_id, &payload).await?;
    info!(resume_id = %resume.id, user_id = %user_id, "resume created");
    Ok((StatusCode::CREATED, Json(resume)))
}

#[instrument(skip(state))]
pub async fn list_resumes(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Query(f): Query<ResumeFilter>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Resume>>, AppError> {
    let resumes = Resume::list(&state.db, f.user, p.limit, p.offset).await?;
    Ok(Json(resumes))
}

#[instrument(skip(state))]
pub async fn get_resume(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Resume>, AppError> {
    let resume = Resume::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("resume not found".into()))?;
    Ok(Json(resume))
}

#[instrument(skip(state, payload))]
pub async fn update_resume(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ResumeUpdate>,
) -> Result<Json<Resume>, AppError> {
    let resume = Resume::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("resume not found".into()))?;
    if resume.user_id != acting {
        return Err(AppError::Forbidden);
    }
    let resume = Resume::update(&state.db, id, &payload).await?;
    Ok(Json(resume))
}

#[instrument(skip(state))]
pub async fn delete_resume(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let resume = Resume::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("resume not found".into()))?;
    if resume.user_id != acting {
        return Err(AppError::Forbidden);
    }
    Resume::delete(&state.db, id).await?;
    info!(resume_id = %id, "resume deleted");
    Ok(StatusCode::NO_CONTENT)
}
