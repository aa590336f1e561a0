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
            "/resumes",
            post(handlers::create_resume).get(handlers::list_resumes),
        )
        .route(
            "/resumes/:id",
            get(handlers::get_resume)
                .patch(handlers::update_resume)
                .delete(handlers::delete_resume),
        )
}
