use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::ApplicationCreate;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub resume_id: Uuid,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const APPLICATION_COLUMNS: &str = r#"
    id, user_id, job_id, resume_id, cover_letter, status, created_at, updated_at
"#;

impl Application {
    pub async fn create(
        conn: &mut PgConnection,
        user_id: Uuid,
        new: &ApplicationCreate,
    ) -> Result<Application, sqlx::Error> {
        sqlx::query_as::<_, Application>(&format!(
            r#"
            INSERT INTO applications (user_id, job_id, resume_id, cover_letter)
            VALUES ($1, $2, $3, $4)
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(new.job_id)
        .bind(new.resume_id)
        .bind(new.cover_letter.clone().unwrap_or_default())
        .fetch_one(conn)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Application>, sqlx::Error> {
        sqlx::query_as::<_, Application>(&format!(
            r#"SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Loads the row inside a transaction, locked against concurrent
    /// status changes.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Application>, sqlx::Error> {
        sqlx::query_as::<_, Application>(&format!(
            r#"SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = $1 FOR UPDATE"#
        ))
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    pub async fn list(
        db: &PgPool,
        user: Option<Uuid>,
        job: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Application>, sqlx::Error> {
        sqlx::query_as::<_, Application>(&format!(
            r#"
            SELECT {APPLICATION_COLUMNS}
            FROM applications
            WHERE ($1::uuid IS NULL OR user_id = $1)
              AND ($2::uuid IS NULL OR job_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(user)
        .bind(job)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    pub async fn set_status(
        conn: &mut PgConnection,
        id: Uuid,
        status: ApplicationStatus,
    ) -> Result<Application, sqlx::Error> {
        sqlx::query_as::<_, Application>(&format!(
            r#"
            UPDATE applications SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {APPLICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status)
        .fetch_one(conn)
        .await
    }

    /// The two parties of an application: the applicant and the user
    /// representing the job's company.
    pub async fn participants(
        db: &PgPool,
        application_id: Uuid,
    ) -> Result<Option<(Uuid, Uuid)>, sqlx::Error> {
        sqlx::query_as(
            r#"
            SELECT a.user_id, c.user_id
            FROM applications a
            JOIN jobs j ON j.id = a.job_id
            JOIN companies c ON c.id = j.company_id
            WHERE a.id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&ApplicationStatus::Accepted).unwrap(),
            "\"accepted\""
        );
    }

    #[test]
    fn status_deserializes_from_wire_form() {
        let s: ApplicationStatus = serde_json::from_str("\"reviewing\"").unwrap();
        assert_eq!(s, ApplicationStatus::Reviewing);
    }
}
