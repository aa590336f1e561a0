use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::{CompanyCreate, CompanyUpdate};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Company {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub logo: String,
    pub description: String,
    pub website: String,
    pub industry: String,
    pub size: String,
    pub founded_year: i32,
    pub status: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const COMPANY_COLUMNS: &str = r#"
    id, user_id, name, logo, description, website, industry, size,
    founded_year, status, created_at, updated_at
"#;

impl Company {
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        new: &CompanyCreate,
    ) -> Result<Company, sqlx::Error> {
        sqlx::query_as::<_, Company>(&format!(
            r#"
            INSERT INTO companies (
                user_id, name, logo, description, website, industry, size,
                founded_year, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&new.name)
        .bind(new.logo.clone().unwrap_or_default())
        .bind(new.description.clone().unwrap_or_default())
        .bind(new.website.clone().unwrap_or_default())
        .bind(new.industry.clone().unwrap_or_default())
        .bind(new.size.clone().unwrap_or_default())
        .bind(new.founded_year.unwrap_or(0))
        .bind(new.status.clone().unwrap_or_else(|| "active".into()))
        .fetch_one(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>(&format!(
            r#"SELECT {COMPANY_COLUMNS} FROM companies WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_user(db: &PgPool, user_id: Uuid) -> Result<Option<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>(&format!(
            r#"SELECT {COMPANY_COLUMNS} FROM companies WHERE user_id = $1"#
        ))
        .bind(user_id)
        .fetch_optional(db)
        .await
    }

    pub async fn list(
        db: &PgPool,
        user: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Company>, sqlx::Error> {
        sqlx::query_as::<_, Company>(&format!(
            r#"
            SELECT {COMPANY_COLUMNS}
            FROM companies
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

    pub async fn update(
        db: &PgPool,
        id: Uuid,
        upd: &CompanyUpdate,
    ) -> Result<Company, sqlx::Error> {
        sqlx::query_as::<_, Company>(&format!(
            r#"
            UPDATE companies SET
                name         = COALESCE($2, name),
                logo         = COALESCE($3, logo),
                description  = COALESCE($4, description),
                website      = COALESCE($5, website),
                industry     = COALESCE($6, industry),
                size         = COALESCE($7, size),
                founded_year = COALESCE($8, founded_year),
                status       = COALESCE($9, status),
                updated_at   = now()
            WHERE id = $1
            RETURNING {COMPANY_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&upd.name)
        .bind(&upd.logo)
        .bind(&upd.description)
        .bind(&upd.website)
        .bind(&upd.industry)
        .bind(&upd.size)
        .bind(upd.founded_year)
        .bind(&upd.status)
        .fetch_one(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
        let res = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}
