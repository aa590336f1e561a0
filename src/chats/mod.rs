pub mod dto;
pub mod handlers;
pub mod repo;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/chats", get(handlers::list_chats))
        .route("/chats/:id", get(handlers::get_chat))
        .route("/chats/:id/status", patch(handlers::update_chat_status))
        .route(
            "/chats/:id/messages",
            get(handlers::list_messages).post(handlers::post_message),
        )
}
