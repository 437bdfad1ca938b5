//! Replica server implementation
//!
//! Each replica holds its own auction and never talks to other replicas:
//! - In-memory auction state behind a readers-writer lock
//! - One-shot timer that closes the auction
//! - HTTP adapter for bids and status queries

pub mod auction;
pub mod http;
pub mod server;
pub mod timer;

pub use auction::{AuctionState, BidOutcome, StatusSnapshot};
pub use server::ReplicaServer;
pub use timer::AuctionTimer;
