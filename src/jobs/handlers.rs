use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::jwt::AuthUser, companies::repo::Company, errors::AppError, pagination::Pagination,
    state::AppState,
};

use super::dto::{JobCreate, JobFilter, JobUpdate};
use super::repo::Job;

#[instrument(skip(state, payload))]
pub async fn create_job(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<JobCreate>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    if payload.title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    let company = Company::find_by_user(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::Validation("acting user has no company".into()))?;

    let job = Job::create(&state.db, company.id, &payload).await?;
    info!(job_id = %job.id, company_id = %company.id, "job created");
    Ok((StatusCode::CREATED, Json(job)))
}

#[instrument(skip(state))]
pub async fn list_jobs(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Query(f): Query<JobFilter>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = Job::list(&state.db, f.company, p.limit, p.offset).await?;
    Ok(Json(jobs))
}

#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = Job::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("job not found".into()))?;
    Ok(Json(job))
}

#[instrument(skip(state, payload))]
pub async fn update_job(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<JobUpdate>,
) -> Result<Json<Job>, AppError> {
    check_owner(&state, id, acting).await?;
    let job = Job::update(&state.db, id, &payload).await?;
    Ok(Json(job))
}

#[instrument(skip(state))]
pub async fn delete_job(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    check_owner(&state, id, acting).await?;
    Job::delete(&state.db, id).await?;
    info!(job_id = %id, "job deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn check_owner(state: &AppState, job_id: Uuid, acting: Uuid) -> Result<(), AppError> {
    let owner = Job::owner_user(&state.db, job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("job not found".into()))?;
    if owner != acting {
        return Err(AppError::Forbidden);
    }
    Ok(())
}
