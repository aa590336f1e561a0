use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use time::OffsetDateTime;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    applications::repo::Application, auth::jwt::AuthUser, companies::repo::Company,
    errors::AppError, pagination::Pagination, state::AppState,
};

use super::dto::{AuctionFilter, BidCreate};
use super::repo::{Auction, AuctionBid};
use super::services::validate_bid;

#[instrument(skip(state))]
pub async fn get_auction(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Auction>, AppError> {
    let auction = Auction::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("auction not found".into()))?;
    Ok(Json(auction))
}

#[instrument(skip(state))]
pub async fn list_auctions(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Query(f): Query<AuctionFilter>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Auction>>, AppError> {
    let auctions = Auction::list(&state.db, f.application, p.limit, p.offset).await?;
    Ok(Json(auctions))
}

/// pending → active. Only the representative of the company whose job the
/// application targets may start the bidding.
#[instrument(skip(state))]
pub async fn start_auction(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Auction>, AppError> {
    let auction = Auction::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("auction not found".into()))?;
    check_controller(&state, auction.application_id, acting).await?;

    let auction = Auction::start(&state.db, id, state.config.auction.stage_minutes)
        .await?
        .ok_or_else(|| AppError::Conflict("auction is not pending".into()))?;

    info!(auction_id = %id, "auction started");
    Ok(Json(auction))
}

#[instrument(skip(state))]
pub async fn cancel_auction(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Auction>, AppError> {
    let auction = Auction::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("auction not found".into()))?;
    check_controller(&state, auction.application_id, acting).await?;

    let auction = Auction::cancel(&state.db, id)
        .await?
        .ok_or_else(|| AppError::Conflict("auction already finished".into()))?;

    info!(auction_id = %id, "auction cancelled");
    Ok(Json(auction))
}

/// Bid placement runs with the auction row locked so stage checks and the
/// insert are atomic against concurrent bidders and the stage scheduler.
#[instrument(skip(state, payload))]
pub async fn place_bid(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<BidCreate>,
) -> Result<(StatusCode, Json<AuctionBid>), AppError> {
    let company = Company::find_by_user(&state.db, acting)
        .await?
        .ok_or_else(|| AppError::Validation("acting user has no company".into()))?;

    let mut tx = state.db.begin().await?;
    let auction = Auction::find_for_update(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::NotFound("auction not found".into()))?;

    validate_bid(&auction, payload.stage, OffsetDateTime::now_utc())?;

    let bid =
        AuctionBid::create(&mut tx, auction.id, company.id, payload.stage, &payload.value).await?;
    tx.commit().await?;

    info!(auction_id = %id, bid_id = %bid.id, company_id = %company.id, stage = bid.stage, "bid placed");
    Ok((StatusCode::CREATED, Json(bid)))
}

#[instrument(skip(state))]
pub async fn list_bids(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Path(id): Path<Uuid>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<AuctionBid>>, AppError> {
    if Auction::find_by_id(&state.db, id).await?.is_none() {
        return Err(AppError::NotFound("auction not found".into()));
    }
    let bids = AuctionBid::list_by_auction(&state.db, id, p.limit, p.offset).await?;
    Ok(Json(bids))
}

async fn check_controller(
    state: &AppState,
    application_id: Uuid,
    acting: Uuid,
) -> Result<(), AppError> {
    let (_applicant, company_user) = Application::participants(&state.db, application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("application not found".into()))?;
    if company_user != acting {
        return Err(AppError::Forbidden);
    }
    Ok(())
}
