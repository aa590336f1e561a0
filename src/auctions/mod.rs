pub mod dto;
pub mod handlers;
pub mod repo;
pub mod scheduler;
pub mod services;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auctions", get(handlers::list_auctions))
        .route("/auctions/:id", get(handlers::get_auction))
        .route("/auctions/:id/start", post(handlers::start_auction))
        .route("/auctions/:id/cancel", post(handlers::cancel_auction))
        .route(
            "/auctions/:id/bids",
            post(handlers::place_bid).get(handlers::list_bids),
        )
}
