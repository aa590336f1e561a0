use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
    pub refresh_ttl_minutes: i64,
}

/// Staged-bidding policy values. Invariants are fixed in code, the
/// numbers come from the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct AuctionConfig {
    pub stage_minutes: i64,
    pub max_stages: i32,
    pub tick_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
    pub auction: AuctionConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("JWT_SECRET")?,
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "jobhub".into()),
            audience: std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| "jobhub-users".into()),
            ttl_minutes: std::env::var("JWT_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60),
            refresh_ttl_minutes: std::env::var("JWT_REFRESH_TTL_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24 * 14),
        };
        let auction = AuctionConfig {
            stage_minutes: std::env::var("AUCTION_STAGE_MINUTES")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(60 * 24),
            max_stages: std::env::var("AUCTION_MAX_STAGES")
                .ok()
                .and_then(|v| v.parse::<i32>().ok())
                .unwrap_or(3),
            tick_seconds: std::env::var("AUCTION_TICK_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(30),
        };
        Ok(Self {
            database_url,
            jwt,
            auction,
        })
    }
}
