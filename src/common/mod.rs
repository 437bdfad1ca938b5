//! Common utilities and types shared across minibid

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod tracing_middleware;
pub mod utils;
pub mod wire;

pub use config::{Config, CoordinatorConfig, ReplicaConfig};
pub use error::{Error, Result};
pub use utils::{parse_duration, truncate_amount};
pub use wire::{AuctionStatus, BidRequest, BidResponse, QueryResponse};
