use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{JobCreate, JobUpdate};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub requirements: String,
    pub salary_min: i32,
    pub salary_max: i32,
    pub city: String,
    pub metro: String,
    pub job_type: String,
    pub schedule: String,
    pub experience: i32,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const JOB_COLUMNS: &str = r#"
    id, company_id, title, description, requirements, salary_min, salary_max,
    city, metro, job_type, schedule, experience, status, created_at, updated_at
"#;

impl Job {
    pub async fn create(
        db: &PgPool,
        company_id: Uuid,
        new: &JobCreate,
    ) -> Result<Job, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            INSERT INTO jobs (
                company_id, title, description, requirements, salary_min,
                salary_max, city, metro, job_type, schedule, experience, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(company_id)
        .bind(&new.title)
        .bind(new.description.clone().unwrap_or_default())
        .bind(new.requirements.clone().unwrap_or_default())
        .bind(new.salary_min.unwrap_or(0))
        .bind(new.salary_max.unwrap_or(0))
        .bind(new.city.clone().unwrap_or_default())
        .bind(new.metro.clone().unwrap_or_default())
        .bind(new.job_type.clone().unwrap_or_default())
        .bind(new.schedule.clone().unwrap_or_default())
        .bind(new.experience.unwrap_or(0))
        .bind(new.status.clone().unwrap_or_else(|| "active".into()))
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(r#"SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"#))
            .bind(id)
            .fetch_optional(db)
            .await
    }

    pub async fn list(
        db: &PgPool,
        company: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            SELECT {JOB_COLUMNS}
            FROM jobs
            WHERE ($1::uuid IS NULL OR company_id = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(company)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    pub async fn update(db: &PgPool, id: Uuid, upd: &JobUpdate) -> Result<Job, sqlx::Error> {
        sqlx::query_as::<_, Job>(&format!(
            r#"
            UPDATE jobs SET
                title        = COALESCE($2, title),
                description  = COALESCE($3, description),
                requirements = COALESCE($4, requirements),
                salary_min   = COALESCE($5, salary_min),
                salary_max   = COALESCE($6, salary_max),
                city         = COALESCE($7, city),
                metro        = COALESCE($8, metro),
                job_type     = COALESCE($9, job_type),
                schedule     = COALESCE($10, schedule),
                experience   = COALESCE($11, experience),
                status       = COALESCE($12, status),
                updated_at   = now()
            WHERE id = $1
            RETURNING {JOB_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&upd.title)
        .bind(&upd.description)
        .bind(&upd.requirements)
        .bind(upd.salary_min)
        .bind(upd.salary_max)
        .bind(&upd.city)
        .bind(&upd.metro)
        .bind(&upd.job_type)
        .bind(&upd.schedule)
        .bind(upd.experience)
        .bind(&upd.status)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }

    /// Resolves the user allowed to manage this job (the owning company's
    /// representative).
    pub async fn owner_user(db: &PgPool, job_id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
        let row: Option<(Uuid,)> = sqlx::query_as(
            r#"
            SELECT c.user_id
            FROM jobs j
            JOIN companies c ON c.id = j.company_id
            WHERE j.id = $1
            "#,
        )
        .bind(job_id)
        .fetch_optional(db)
        .await?;
        Ok(row.map(|(id,)| id))
    }
}
