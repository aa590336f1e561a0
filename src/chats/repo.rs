use serde::Serialize;
use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::MessageCreate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Chat {
    pub id: Uuid,
    pub application_id: Uuid,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub message_type: String,
    pub metadata: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const CHAT_COLUMNS: &str = r#"
    id, application_id, status, created_at, updated_at
"#;

const MESSAGE_COLUMNS: &str = r#"
    id, chat_id, sender_id, content, message_type, metadata, created_at, updated_at
"#;

impl Chat {
    /// One chat per application, created alongside the application itself.
    pub async fn create(conn: &mut PgConnection, application_id: Uuid) -> Result<Chat, sqlx::Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            INSERT INTO chats (application_id)
            VALUES ($1)
            RETURNING {CHAT_COLUMNS}
            "#
        ))
        .bind(application_id)
        .fetch_one(conn)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Chat>, sqlx::Error> {
        sqlx::query_as::<_, Chat>(&format!(r#"SELECT {CHAT_COLUMNS} FROM chats WHERE id = $1"#))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn list(
        db: &PgPool,
        application: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Chat>, sqlx::Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            SELECT {CHAT_COLUMNS}
            FROM chats
            WHERE ($1::uuid IS NULL OR application_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(application)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    pub async fn update_status(db: &PgPool, id: Uuid, status: &str) -> Result<Chat, sqlx::Error> {
        sqlx::query_as::<_, Chat>(&format!(
            r#"
            UPDATE chats SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {CHAT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_one(db)
        .await
    }
}

impl Message {
    /// Append-only: messages are never edited or deleted.
    pub async fn create(
        db: &PgPool,
        chat_id: Uuid,
        sender_id: Uuid,
        new: &MessageCreate,
    ) -> Result<Message, sqlx::Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages (chat_id, sender_id, content, message_type, metadata)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {MESSAGE_COLUMNS}
            "#
        ))
        .bind(chat_id)
        .bind(sender_id)
        .bind(&new.content)
        .bind(new.message_type.clone().unwrap_or_else(|| "text".into()))
        .bind(
            new.metadata
                .clone()
                .unwrap_or_else(|| serde_json::json!({})),
        )
        .fetch_one(db)
        .await
    }

    pub async fn list_by_chat(
        db: &PgPool,
        chat_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Message>, sqlx::Error> {
        sqlx::query_as::<_, Message>(&format!(
            r#"
            SELECT {MESSAGE_COLUMNS}
            FROM messages
            WHERE chat_id = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(chat_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }
}
