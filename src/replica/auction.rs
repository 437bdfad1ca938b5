//! Per-replica auction state machine
//!
//! One [`AuctionState`] lives for the whole replica process. All access goes
//! through a single readers-writer lock: bids and the close transition take
//! it exclusively, status reads share it. The order in which writers acquire
//! the lock is the authoritative bid order.

use crate::common::utils::seconds_remaining;
use crate::common::wire::{AuctionStatus, BidResponse, QueryResponse};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tokio::time::Instant;

/// Reason attached to bids that do not beat the current highest bid
pub const REASON_BID_TOO_LOW: &str = "bid must be higher than current highest bid";

/// Application-level result of a bid attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidOutcome {
    Accepted,
    Rejected(&'static str),
    AuctionEnded,
}

impl From<BidOutcome> for BidResponse {
    fn from(outcome: BidOutcome) -> Self {
        match outcome {
            BidOutcome::Accepted => BidResponse::Success,
            BidOutcome::Rejected(reason) => BidResponse::Fail {
                reason: reason.to_string(),
            },
            BidOutcome::AuctionEnded => BidResponse::AuctionEnded,
        }
    }
}

/// Point-in-time view of the auction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub status: AuctionStatus,
    pub highest_bid: i64,
    pub highest_bidder: String,
    pub time_remaining: i64,
    /// Set only once the auction has ended
    pub winner: Option<String>,
}

impl From<StatusSnapshot> for QueryResponse {
    fn from(s: StatusSnapshot) -> Self {
        QueryResponse {
            status: s.status,
            highest_bid: s.highest_bid,
            highest_bidder: s.highest_bidder,
            time_remaining: s.time_remaining,
            winner: s.winner,
        }
    }
}

#[derive(Debug)]
struct Ledger {
    status: AuctionStatus,
    highest_bid: i64,
    highest_bidder: String,
    /// Last accepted amount per bidder
    bidders: HashMap<String, i64>,
}

#[derive(Debug)]
pub struct AuctionState {
    ledger: RwLock<Ledger>,
    started_at: Instant,
    started_at_utc: DateTime<Utc>,
    duration: Duration,
}

impl AuctionState {
    /// Open a new auction that runs for `duration` starting now.
    pub fn new(duration: Duration) -> Self {
        Self {
            ledger: RwLock::new(Ledger {
                status: AuctionStatus::Ongoing,
                highest_bid: 0,
                highest_bidder: String::new(),
                bidders: HashMap::new(),
            }),
            started_at: Instant::now(),
            started_at_utc: Utc::now(),
            duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at_utc
    }

    /// Instant at which the auction is due to close
    pub fn deadline(&self) -> Instant {
        self.started_at + self.duration
    }

    // The ledger is never left half-written, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Try to place a bid. The only operation that changes the leader board.
    pub fn place_bid(&self, bidder: &str, amount: i64) -> BidOutcome {
        let mut ledger = self.write();

        if ledger.status == AuctionStatus::Ended {
            tracing::info!(bidder, amount, "Bid refused: auction ended");
            return BidOutcome::AuctionEnded;
        }

        if amount <= ledger.highest_bid {
            tracing::info!(
                bidder,
                amount,
                highest_bid = ledger.highest_bid,
                "Bid rejected: not higher than current highest bid"
            );
            return BidOutcome::Rejected(REASON_BID_TOO_LOW);
        }

        ledger.highest_bid = amount;
        ledger.highest_bidder = bidder.to_string();
        ledger.bidders.insert(bidder.to_string(), amount);
        tracing::info!(bidder, amount, "Bid accepted");

        BidOutcome::Accepted
    }

    pub fn status(&self) -> StatusSnapshot {
        let ledger = self.read();
        let elapsed = Instant::now().saturating_duration_since(self.started_at);

        StatusSnapshot {
            status: ledger.status,
            highest_bid: ledger.highest_bid,
            highest_bidder: ledger.highest_bidder.clone(),
            time_remaining: seconds_remaining(self.duration, elapsed),
            winner: (ledger.status == AuctionStatus::Ended).then(|| ledger.highest_bidder.clone()),
        }
    }

    /// End the auction if its deadline has passed. Returns `true` only for
    /// the call that performed the transition.
    pub fn close_if_expired(&self) -> bool {
        let mut ledger = self.write();

        if ledger.status == AuctionStatus::Ended || Instant::now() < self.deadline() {
            return false;
        }

        ledger.status = AuctionStatus::Ended;
        true
    }

    pub fn is_ended(&self) -> bool {
        self.read().status == AuctionStatus::Ended
    }

    /// Last amount `bidder` successfully bid, if any
    pub fn last_bid(&self, bidder: &str) -> Option<i64> {
        self.read().bidders.get(bidder).copied()
    }

    pub fn bidder_count(&self) -> usize {
        self.read().bidders.len()
    }
}
