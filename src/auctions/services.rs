use time::OffsetDateTime;

use super::repo::{Auction, AuctionStatus};
use crate::errors::AppError;

/// What happens to an active auction once its stage deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    /// Open the next stage and push the deadline out by one stage duration.
    Advance,
    /// Terminal: the last stage ran out, or the stage drew no bids.
    Complete,
}

/// A stage that drew no bids ends the auction; so does reaching the
/// configured stage cap. `current_stage` never decreases.
pub fn stage_outcome(current_stage: i32, max_stages: i32, bids_in_stage: i64) -> StageOutcome {
    if bids_in_stage == 0 || current_stage >= max_stages {
        StageOutcome::Complete
    } else {
        StageOutcome::Advance
    }
}

/// Gate for bid placement. Caller holds the auction row locked, so the
/// checks here are race-free.
pub fn validate_bid(auction: &Auction, stage: i32, now: OffsetDateTime) -> Result<(), AppError> {
    if auction.status != AuctionStatus::Active {
        return Err(AppError::Conflict("auction is not accepting bids".into()));
    }
    if stage != auction.current_stage {
        return Err(AppError::Validation(format!(
            "bid stage {} does not match current stage {}",
            stage, auction.current_stage
        )));
    }
    match auction.stage_end_time {
        Some(end) if now < end => Ok(()),
        _ => Err(AppError::Conflict("current stage has ended".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Duration;
    use uuid::Uuid;

    fn active_auction(current_stage: i32, ends_in: Duration) -> Auction {
        let now = OffsetDateTime::now_utc();
        Auction {
            id: Uuid::new_v4(),
            application_id: Uuid::new_v4(),
            status: AuctionStatus::Active,
            start_time: Some(now - Duration::hours(1)),
            current_stage,
            stage_end_time: Some(now + ends_in),
            created_at: now - Duration::hours(1),
            updated_at: now,
        }
    }

    #[test]
    fn bid_in_current_stage_before_deadline_is_accepted() {
        let auction = active_auction(3, Duration::minutes(10));
        assert!(validate_bid(&auction, 3, OffsetDateTime::now_utc()).is_ok());
    }

    #[test]
    fn bid_for_earlier_stage_is_rejected() {
        let auction = active_auction(3, Duration::minutes(10));
        let err = validate_bid(&auction, 2, OffsetDateTime::now_utc()).unwrap_err();
        assert!(err.to_string().contains("does not match current stage"));
    }

    #[test]
    fn bid_for_future_stage_is_rejected() {
        let auction = active_auction(1, Duration::minutes(10));
        assert!(validate_bid(&auction, 2, OffsetDateTime::now_utc()).is_err());
    }

    #[test]
    fn bid_after_stage_deadline_is_rejected() {
        let auction = active_auction(1, Duration::minutes(-1));
        assert!(validate_bid(&auction, 1, OffsetDateTime::now_utc()).is_err());
    }

    #[test]
    fn bid_on_pending_auction_is_rejected() {
        let mut auction = active_auction(0, Duration::minutes(10));
        auction.status = AuctionStatus::Pending;
        assert!(validate_bid(&auction, 0, OffsetDateTime::now_utc()).is_err());
    }

    #[test]
    fn bid_on_terminal_auction_is_rejected() {
        for status in [AuctionStatus::Completed, AuctionStatus::Cancelled] {
            let mut auction = active_auction(2, Duration::minutes(10));
            auction.status = status;
            assert!(validate_bid(&auction, 2, OffsetDateTime::now_utc()).is_err());
        }
    }

    #[test]
    fn stage_with_bids_advances_below_cap() {
        assert_eq!(stage_outcome(1, 3, 4), StageOutcome::Advance);
        assert_eq!(stage_outcome(2, 3, 1), StageOutcome::Advance);
    }

    #[test]
    fn stage_without_bids_completes() {
        assert_eq!(stage_outcome(1, 3, 0), StageOutcome::Complete);
    }

    #[test]
    fn final_stage_completes_even_with_bids() {
        assert_eq!(stage_outcome(3, 3, 5), StageOutcome::Complete);
    }
}
