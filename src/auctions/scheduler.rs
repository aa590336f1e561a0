use std::time::Duration;

use tracing::{error, info};

use super::repo::{Auction, AuctionBid};
use super::services::{stage_outcome, StageOutcome};
use crate::state::AppState;

/// Background stage clock: every tick, each active auction whose deadline
/// has passed either advances a stage or completes.
pub fn spawn(state: AppState) -> tokio::task::JoinHandle<()> {
    let tick = Duration::from_secs(state.config.auction.tick_seconds);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            match run_once(&state).await {
                Ok(0) => {}
                Ok(n) => info!(transitions = n, "auction stages advanced"),
                Err(e) => error!(error = %e, "auction stage sweep failed"),
            }
        }
    })
}

/// One sweep over due auctions. Each transition is a compare-and-set
/// keyed on the stage this sweep observed, so a concurrent worker (or a
/// second instance of the service) can never double-advance an auction
/// past a single deadline.
pub async fn run_once(state: &AppState) -> Result<u64, sqlx::Error> {
    let policy = &state.config.auction;
    let mut transitions = 0;

    for auction in Auction::due(&state.db).await? {
        let bids =
            AuctionBid::count_in_stage(&state.db, auction.id, auction.current_stage).await?;

        let changed = match stage_outcome(auction.current_stage, policy.max_stages, bids) {
            StageOutcome::Complete => {
                Auction::complete_if_current(&state.db, auction.id, auction.current_stage).await?
            }
            StageOutcome::Advance => {
                Auction::advance_if_current(
                    &state.db,
                    auction.id,
                    auction.current_stage,
                    policy.stage_minutes,
                )
                .await?
            }
        };

        if changed {
            transitions += 1;
        }
    }

    Ok(transitions)
}
