use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{auth::jwt::AuthUser, errors::AppError, pagination::Pagination, state::AppState};

use super::dto::{CompanyCreate, CompanyFilter, CompanyUpdate};
use super::repo::Company;

#[instrument(skip(state, payload))]
pub async fn create_company(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(payload): Json<CompanyCreate>,
) -> Result<(StatusCode, Json<Company>), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("name is required".into()));
    }
    // Unique user_id index turns a second company into a conflict
    let company = Company::create(&state.db, user_id, &payload).await?;
    info!(company_id = %company.id, user_id = %user_id, "company created");
    Ok((StatusCode::CREATED, Json(company)))
}

#[instrument(skip(state))]
pub async fn list_companies(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Query(f): Query<CompanyFilter>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Company>>, AppError> {
    let companies = Company::list(&state.db, f.user, p.limit, p.offset).await?;
    Ok(Json(companies))
}

#[instrument(skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Company>, AppError> {
    let company = Company::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("company not found".into()))?;
    Ok(Json(company))
}

#[instrument(skip(state, payload))]
pub async fn update_company(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CompanyUpdate>,
) -> Result<Json<Company>, AppError> {
    let company = Company::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("company not found".into()))?;
    if company.user_id != acting {
        return Err(AppError::Forbidden);
    }
    let company = Company::update(&state.db, id, &payload).await?;
    Ok(Json(company))
}

#[instrument(skip(state))]
pub async fn delete_company(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let company = Company::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("company not found".into()))?;
    if company.user_id != acting {
        return Err(AppError::Forbidden);
    }
    Company::delete(&state.db, id).await?;
    info!(company_id = %id, "company deleted");
    Ok(StatusCode::NO_CONTENT)
}
