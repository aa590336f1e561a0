use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::UserUpdate;
use super::services::NewUser;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Company,
    Admin,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    // write-only: accepted as `password` on input, never serialized
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
    pub date_of_birth: String,
    pub phone: String,
    pub country: String,
    pub region: String,
    pub district: String,
    pub publish_phone: bool,
    pub publish_status: bool,
    pub role: UserRole,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

const USER_COLUMNS: &str = r#"
    id, email, password_hash, first_name, last_name, avatar, date_of_birth,
    phone, country, region, district, publish_phone, publish_status, role,
    created_at, updated_at
"#;

impl User {
    pub async fn create(db: &PgPool, new: &NewUser) -> Result<User, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (
                email, password_hash, first_name, last_name, avatar,
                date_of_birth, phone, country, region, district,
                publish_phone, publish_status, role
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new.email)
        .bind(&new.password_hash)
        .bind(&new.first_name)
        .bind(&new.last_name)
        .bind(&new.avatar)
        .bind(&new.date_of_birth)
        .bind(&new.phone)
        .bind(&new.country)
        .bind(&new.region)
        .bind(&new.district)
        .bind(new.publish_phone)
        .bind(new.publish_status)
        .bind(new.role)
        .fetch_one(db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM users WHERE email = $1"#
        ))
        .bind(email)
        .fetch_optional(db)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"SELECT {USER_COLUMNS} FROM users WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list(db: &PgPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    /// Partial update: a `None` field keeps the stored value. Creation
    /// defaults are never re-applied here.
    pub async fn update(db: &PgPool, id: Uuid, upd: &UserUpdate) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users SET
                first_name     = COALESCE($2, first_name),
                last_name      = COALESCE($3, last_name),
                avatar         = COALESCE($4, avatar),
                date_of_birth  = COALESCE($5, date_of_birth),
                phone          = COALESCE($6, phone),
                country        = COALESCE($7, country),
                region         = COALESCE($8, region),
                district       = COALESCE($9, district),
                publish_phone  = COALESCE($10, publish_phone),
                publish_status = COALESCE($11, publish_status),
                updated_at     = now()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&upd.first_name)
        .bind(&upd.last_name)
        .bind(&upd.avatar)
        .bind(&upd.date_of_birth)
        .bind(&upd.phone)
        .bind(&upd.country)
        .bind(&upd.region)
        .bind(&upd.district)
        .bind(upd.publish_phone)
        .bind(upd.publish_status)
        .fetch_one(db)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            first_name: "".into(),
            last_name: "".into(),
            avatar: "".into(),
            date_of_birth: "".into(),
            phone: "".into(),
            country: "".into(),
            region: "".into(),
            district: "".into(),
            publish_phone: false,
            publish_status: false,
            role: UserRole::Student,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    #[test]
    fn serialized_user_never_contains_credential() {
        let json = serde_json::to_string(&sample_user()).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("a@x.com"));
    }

    #[test]
    fn serialized_list_never_contains_credential() {
        let json = serde_json::to_string(&vec![sample_user(), sample_user()]).unwrap();
        assert!(!json.contains("password"));
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserRole::Student).unwrap(),
            "\"student\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Company).unwrap(),
            "\"company\""
        );
    }
}
