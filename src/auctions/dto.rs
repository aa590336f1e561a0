use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct BidCreate {
    pub stage: i32,
    pub value: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct AuctionFilter {
    pub application: Option<Uuid>,
}
