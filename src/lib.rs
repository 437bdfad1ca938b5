//! # minibid
//!
//! A replicated online auction:
//! - Independent replicas, each holding its own auction in memory
//! - A one-shot timer per replica that closes its auction
//! - A coordinator that broadcasts bids and queries replicas in order
//!
//! Replicas are deliberately unsynchronized. Each one sees only the bids
//! routed to it and decides on them alone, so their highest bids can
//! diverge and stay diverged.
//!
//! ## Architecture
//!
//! ```text
//!           ┌──────────────────────────┐
//!           │       Coordinator        │
//!           │  bid: fan-out to all     │
//!           │  query: first success    │
//!           └────────────┬─────────────┘
//!                        │ HTTP/JSON
//!          ┌─────────────┴─────────────┐
//!          │                           │
//!   ┌──────▼───────┐            ┌──────▼───────┐
//!   │  Replica A   │            │  Replica B   │
//!   │ AuctionState │            │ AuctionState │
//!   │  + timer     │            │  + timer     │
//!   └──────────────┘            └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ### Start two replicas
//! ```bash
//! minibid-replica serve --port 8080 --duration 100s
//! minibid-replica serve --port 8081 --duration 100s
//! ```
//!
//! ### Run the coordinator console
//! ```bash
//! minibid-coord --replica http://localhost:8080 --replica http://localhost:8081
//! > 1 alice 100
//! > 2
//! ```

pub mod common;
pub mod coordinator;
pub mod replica;

// Re-export commonly used types
pub use common::{Config, Error, Result};
pub use coordinator::Coordinator;
pub use replica::ReplicaServer;

/// Current version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
