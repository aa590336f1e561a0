use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{ResumeCreate, ResumeUpdate};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Resume {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub photo: String,
    pub city: String,
    pub metro: String,
    pub skills: serde_json::Value,
    pub experience_years: i32,
    pub current_position: String,
    pub degree: String,
    pub university: String,
    pub graduation_year: i32,
    pub specialization: String,
    pub expected_salary: i32,
    pub languages: serde_json::Value,
    pub availability: String,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub last_active: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const RESUME_COLUMNS: &str = r#"
    id, user_id, title, photo, city, metro, skills, experience_years,
    current_position, degree, university, graduation_year, specialization,
    expected_salary, languages, availability, status, last_active,
    created_at, updated_at
"#;

impl Resume {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        new: &ResumeCreate,
    ) -> Result<Resume, sqlx::Error> {
        sqlx::query_as::<_, Resume>(&format!(
            r#"
            INSERT INTO resumes (
                user_id, title, photo, city, metro, skills, experience_years,
                current_position, degree, university, graduation_year,
                specialization, expected_salary, languages, availability, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {RESUME_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&new.title)
        .bind(new.photo.clone().unwrap_or_default())
        .bind(new.city.clone().unwrap_or_default())
        .bind(new.metro.clone().unwrap_or_default())
        .bind(new.skills.clone().unwrap_or_else(|| serde_json::json!([])))
        .bind(new.experience_years.unwrap_or(0))
        .bind(new.current_position.clone().unwrap_or_default())
        .bind(new.degree.clone().unwrap_or_default())
        .bind(new.university.clone().unwrap_or_default())
        .bind(new.graduation_year.unwrap_or(0))
        .bind(new.specialization.clone().unwrap_or_default())
        .bind(new.expected_salary.unwrap_or(0))
        .bind(
            new.languages
                .clone()
                .unwrap_or_else(|| serde_json::json!([])),
        )
        .bind(new.availability.clone().unwrap_or_default())
        .bind(new.status.clone().unwrap_or_else(|| "active".into()))
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Resume>, sqlx::Error> {
        sqlx::query_as::<_, Resume>(&format!(
            r#"SELECT {RESUME_COLUMNS} FROM resumes WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list(
        db: &PgPool,
        user: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Resume>, sqlx::Error> {
        sqlx::query_as::<_, Resume>(&format!(
            r#"
            SELECT {RESUME_COLUMNS}
            FROM resumes
            WHERE ($1::uuid IS NULL OR user_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(user)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// Partial update: `None` keeps the stored value.
    pub async fn update(db: &PgPool, id: Uuid, upd: &ResumeUpdate) -> Result<Resume, sqlx::Error> {
        sqlx::query_as::<_, Resume>(&format!(
            r#"
            UPDATE resumes SET
                title            = COALESCE($2, title),
                photo            = COALESCE($3, photo),
                city             = COALESCE($4, city),
                metro            = COALESCE($5, metro),
                skills           = COALESCE($6, skills),
                experience_years = COALESCE($7, experience_years),
                current_position = COALESCE($8, current_position),
                degree           = COALESCE($9, degree),
                university       = COALESCE($10, university),
                graduation_year  = COALESCE($11, graduation_year),
                specialization   = COALESCE($12, specialization),
                expected_salary  = COALESCE($13, expected_salary),
                languages        = COALESCE($14, languages),
                availability     = COALESCE($15, availability),
                status           = COALESCE($16, status),
                last_active      = now(),
                updated_at       = now()
            WHERE id = $1
            RETURNING {RESUME_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&upd.title)
        .bind(&upd.photo)
        .bind(&upd.city)
        .bind(&upd.metro)
        .bind(&upd.skills)
        .bind(upd.experience_years)
        .bind(&upd.current_position)
        .bind(&upd.degree)
        .bind(&upd.university)
        .bind(upd.graduation_year)
        .bind(&upd.specialization)
        .bind(upd.expected_salary)
        .bind(&upd.languages)
        .bind(&upd.availability)
        .bind(&upd.status)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM resumes WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
