pub mod dto;
pub mod handlers;
pub mod repo;
pub mod services;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::list_users))
        .route(
            "/users/:id",
            get(handlers::get_user).patch(handlers::update_user),
        )
}
