pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/companies",
            post(handlers::create_company).get(handlers::list_companies),
        )
        .route(
            "/companies/:id",
            get(handlers::get_company)
                .patch(handlers::update_company)
                .delete(handlers::delete_company),
        )
}
