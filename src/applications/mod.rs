pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/applications",
            post(handlers::create_application).get(handlers::list_applications),
        )
        .route("/applications/:id", get(handlers::get_application))
        .route("/applications/:id/status", patch(handlers::update_status))
}
