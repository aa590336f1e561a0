use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auctions::repo::Auction, auth::jwt::AuthUser, chats::repo::Chat, errors::AppError,
    jobs::repo::Job, pagination::Pagination, resumes::repo::Resume, state::AppState,
};

use super::dto::{ApplicationCreate, ApplicationFilter, StatusUpdate};
use super::repo::{Application, ApplicationStatus};
use super::services::can_transition;

#[instrument(skip(state, payload))]
pub async fn create_application(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<ApplicationCreate>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let resume = Resume::find_by_id(&state.db, payload.resume_id)
        .await?
        .ok_or_else(|| AppError::Validation("resume does not exist".into()))?;
    if resume.user_id != user_id {
        return Err(AppError::Forbidden);
    }
    if Job::find_by_id(&state.db, payload.job_id).await?.is_none() {
        return Err(AppError::Validation("job does not exist".into()));
    }

    // Application and its chat land together; the unique (user_id, job_id)
    // index turns a repeat application into a conflict.
    let mut tx = state.db.begin().await?;
    let application = Application::create(&mut tx, user_id, &payload).await?;
    Chat::create(&mut tx, application.id).await?;
    tx.commit().await?;

    info!(application_id = %application.id, user_id = %user_id, "application submitted");
    Ok((StatusCode::CREATED, Json(application)))
}

#[instrument(skip(state))]
pub async fn list_applications(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Query(f): Query<ApplicationFilter>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Application>>, AppError> {
    let applications = Application::list(&state.db, f.user, f.job, p.limit, p.offset).await?;
    Ok(Json(applications))
}

#[instrument(skip(state))]
pub async fn get_application(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Application>, AppError> {
    let application = Application::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("application not found".into()))?;
    Ok(Json(application))
}

/// Status transitions are driven by the job's company representative.
/// Acceptance opens the auction: exactly one, created in the same
/// transaction as the status change.
#[instrument(skip(state, payload))]
pub async fn update_status(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<Application>, AppError> {
    let existing = Application::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("application not found".into()))?;
    let owner = Job::owner_user(&state.db, existing.job_id)
        .await?
        .ok_or_else(|| AppError::NotFound("job not found".into()))?;
    if owner != acting {
        return Err(AppError::Forbidden);
    }

    let mut tx = state.db.begin().await?;
    let application = Application::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound("application not found".into()))?;

    if !can_transition(application.status, payload.status) {
        return Err(AppError::Conflict(format!(
            "cannot move application from {:?} to {:?}",
            application.status, payload.status
        )));
    }

    let application = Application::set_status(&mut tx, id, payload.status).await?;
    if payload.status == ApplicationStatus::Accepted {
        let auction = Auction::create(&mut tx, id).await?;
        info!(application_id = %id, auction_id = %auction.id, "auction opened");
    }
    tx.commit().await?;

    info!(application_id = %id, status = ?application.status, "application status changed");
    Ok(Json(application))
}
