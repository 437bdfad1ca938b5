//! One-shot task that closes the auction at its deadline
//!
//! The task sleeps until `started_at + duration`, closes the auction once and
//! exits. There is no cancellation hook: once spawned it cannot be stopped
//! short of the runtime shutting down. It holds only a weak reference, so a
//! state dropped before the deadline is left alone.

use crate::replica::auction::AuctionState;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct AuctionTimer;

impl AuctionTimer {
    /// Spawn the closing task for `state`. Must be called inside a tokio runtime.
    pub fn start(state: &Arc<AuctionState>) -> JoinHandle<()> {
        let deadline = state.deadline();
        let state = Arc::downgrade(state);

        tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;

            let Some(state) = state.upgrade() else {
                tracing::debug!("Auction state dropped before its deadline");
                return;
            };

            if state.close_if_expired() {
                let snapshot = state.status();
                tracing::info!(
                    winner = %snapshot.highest_bidder,
                    highest_bid = snapshot.highest_bid,
                    "Auction ended"
                );
            }
        })
    }
}
