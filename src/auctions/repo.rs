use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgConnection, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "auction_status", rename_all = "lowercase")]
pub enum AuctionStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Auction {
    pub id: Uuid,
    pub application_id: Uuid,
    pub status: AuctionStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_time: Option<OffsetDateTime>,
    pub current_stage: i32,
    #[serde(with = "time::serde::rfc3339::option")]
    pub stage_end_time: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuctionBid {
    pub id: Uuid,
    pub auction_id: Uuid,
    pub company_id: Uuid,
    pub stage: i32,
    pub value: serde_json::Value,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

const AUCTION_COLUMNS: &str = r#"
    id, application_id, status, start_time, current_stage, stage_end_time,
    created_at, updated_at
"#;

const BID_COLUMNS: &str = r#"
    id, auction_id, company_id, stage, value, "timestamp"
"#;

impl Auction {
    /// Opens the auction record for a freshly accepted application:
    /// pending, stage 0, no deadline armed yet. The unique application_id
    /// index keeps this 1:1.
    pub async fn create(
        conn: &mut PgConnection,
        application_id: Uuid,
    ) -> Result<Auction, sqlx::Error> {
        sqlx::query_as::<_, Auction>(&format!(
            r#"
            INSERT INTO auctions (application_id)
            VALUES ($1)
            RETURNING {AUCTION_COLUMNS}
            "#
        ))
        .bind(application_id)
        .fetch_one(conn)
        .await
    }

    pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(&format!(
            r#"SELECT {AUCTION_COLUMNS} FROM auctions WHERE id = $1"#
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn list(
        db: &PgPool,
        application: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(&format!(
            r#"
            SELECT {AUCTION_COLUMNS}
            FROM auctions
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

    /// Locks the auction row for the duration of a bid transaction.
    pub async fn find_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(&format!(
            r#"SELECT {AUCTION_COLUMNS} FROM auctions WHERE id = $1 FOR UPDATE"#
        ))
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// pending → active: arms stage 1 with a fresh deadline. The status
    /// guard in the WHERE clause makes a double start a no-op.
    pub async fn start(
        db: &PgPool,
        id: Uuid,
        stage_minutes: i64,
    ) -> Result<Option<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(&format!(
            r#"
            UPDATE auctions SET
                status = 'active',
                start_time = now(),
                current_stage = 1,
                stage_end_time = now() + make_interval(mins => $2::int),
                updated_at = now()
            WHERE id = $1 AND status = 'pending'
            RETURNING {AUCTION_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(stage_minutes)
        .fetch_optional(db)
        .await
    }

    pub async fn cancel(db: &PgPool, id: Uuid) -> Result<Option<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(&format!(
            r#"
            UPDATE auctions SET status = 'cancelled', updated_at = now()
            WHERE id = $1 AND status IN ('pending', 'active')
            RETURNING {AUCTION_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Active auctions whose stage deadline has passed.
    pub async fn due(db: &PgPool) -> Result<Vec<Auction>, sqlx::Error> {
        sqlx::query_as::<_, Auction>(&format!(
            r#"
            SELECT {AUCTION_COLUMNS}
            FROM auctions
            WHERE status = 'active' AND stage_end_time <= now()
            "#
        ))
        .fetch_all(db)
        .await
    }

    /// Compare-and-set stage advancement keyed on the stage the caller
    /// observed: concurrent workers racing on the same deadline leave
    /// exactly one winner.
    pub async fn advance_if_current(
        db: &PgPool,
        id: Uuid,
        observed_stage: i32,
        stage_minutes: i64,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query(
            r#"
            UPDATE auctions SET
                current_stage = current_stage + 1,
                stage_end_time = stage_end_time + make_interval(mins => $3::int),
                updated_at = now()
            WHERE id = $1 AND current_stage = $2 AND status = 'active'
            "#,
        )
        .bind(id)
        .bind(observed_stage)
        .bind(stage_minutes)
        .execute(db)
        .await?;
        Ok(res.rows_affected() == 1)
    }

    /// Compare-and-set completion, same guard as advancement.
    pub async fn complete_if_current(
        db: &PgPool,
        id: Uuid,
        observed_stage: i32,
    ) -> Result<bool, sqlx::Error> {
        let res = sqlx::query(
            r#"
            UPDATE auctions SET status = 'completed', updated_at = now()
            WHERE id = $1 AND current_stage = $2 AND status = 'active'
            "#,
        )
        .bind(id)
        .bind(observed_stage)
        .execute(db)
        .await?;
        Ok(res.rows_affected() == 1)
    }
}

impl AuctionBid {
    /// Append-only insert; all acceptance checks happen before this under
    /// the auction row lock.
    pub async fn create(
        conn: &mut PgConnection,
        auction_id: Uuid,
        company_id: Uuid,
        stage: i32,
        value: &serde_json::Value,
    ) -> Result<AuctionBid, sqlx::Error> {
        sqlx::query_as::<_, AuctionBid>(&format!(
            r#"
            INSERT INTO auction_bids (auction_id, company_id, stage, value)
            VALUES ($1, $2, $3, $4)
            RETURNING {BID_COLUMNS}
            "#
        ))
        .bind(auction_id)
        .bind(company_id)
        .bind(stage)
        .bind(value)
        .fetch_one(conn)
        .await
    }

    pub async fn list_by_auction(
        db: &PgPool,
        auction_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<AuctionBid>, sqlx::Error> {
        sqlx::query_as::<_, AuctionBid>(&format!(
            r#"
            SELECT {BID_COLUMNS}
            FROM auction_bids
            WHERE auction_id = $1
            ORDER BY "timestamp" DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(auction_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }

    pub async fn count_in_stage(
        db: &PgPool,
        auction_id: Uuid,
        stage: i32,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            r#"SELECT COUNT(*) FROM auction_bids WHERE auction_id = $1 AND stage = $2"#,
        )
        .bind(auction_id)
        .bind(stage)
        .fetch_one(db)
        .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auction_serializes_null_times_before_start() {
        let now = OffsetDateTime::now_utc();
        let auction = Auction {
            id: Uuid::new_v4(),
            application_id: Uuid::new_v4(),
            status: AuctionStatus::Pending,
            start_time: None,
            current_stage: 0,
            stage_end_time: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(&auction).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["current_stage"], 0);
        assert!(json["start_time"].is_null());
        assert!(json["stage_end_time"].is_null());
        // timestamps go out as RFC 3339 strings
        assert!(json["created_at"].as_str().unwrap().contains('T'));
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AuctionStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
    }
}
