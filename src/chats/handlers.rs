use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    applications::repo::Application, auth::jwt::AuthUser, errors::AppError,
    pagination::Pagination, state::AppState,
};

use super::dto::{ChatFilter, ChatStatusUpdate, MessageCreate};
use super::repo::{Chat, Message};

#[instrument(skip(state))]
pub async fn get_chat(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Chat>, AppError> {
    let chat = load_chat_for(&state, id, acting).await?;
    Ok(Json(chat))
}

#[instrument(skip(state))]
pub async fn list_chats(
    State(state): State<AppState>,
    AuthUser(_acting): AuthUser,
    Query(f): Query<ChatFilter>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Chat>>, AppError> {
    let chats = Chat::list(&state.db, f.application, p.limit, p.offset).await?;
    Ok(Json(chats))
}

#[instrument(skip(state, payload))]
pub async fn update_chat_status(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ChatStatusUpdate>,
) -> Result<Json<Chat>, AppError> {
    if payload.status.trim().is_empty() {
        return Err(AppError::Validation("status is required".into()));
    }
    load_chat_for(&state, id, acting).await?;
    let chat = Chat::update_status(&state.db, id, &payload.status).await?;
    Ok(Json(chat))
}

#[instrument(skip(state))]
pub async fn list_messages(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Message>>, AppError> {
    load_chat_for(&state, id, acting).await?;
    let messages = Message::list_by_chat(&state.db, id, p.limit, p.offset).await?;
    Ok(Json(messages))
}

#[instrument(skip(state, payload))]
pub async fn post_message(
    State(state): State<AppState>,
    AuthUser(acting): AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<MessageCreate>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation("content is required".into()));
    }
    load_chat_for(&state, id, acting).await?;
    let message = Message::create(&state.db, id, acting, &payload).await?;
    info!(chat_id = %id, message_id = %message.id, "message posted");
    Ok((StatusCode::CREATED, Json(message)))
}

/// Loads the chat and verifies the acting user is one of the two parties
/// of the underlying application.
async fn load_chat_for(state: &AppState, chat_id: Uuid, acting: Uuid) -> Result<Chat, AppError> {
    let chat = Chat::find_by_id(&state.db, chat_id)
        .await?
        .ok_or_else(|| AppError::NotFound("chat not found".into()))?;
    let (applicant, company_user) = Application::participants(&state.db, chat.application_id)
        .await?
        .ok_or_else(|| AppError::NotFound("application not found".into()))?;
    if acting != applicant && acting != company_user {
        return Err(AppError::Forbidden);
    }
    Ok(chat)
}
