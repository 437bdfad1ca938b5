//! Coordinator implementation
//!
//! The coordinator is responsible for:
//! - Broadcasting each bid to every replica
//! - Answering status queries from the first replica that responds
//! - The interactive operator console

pub mod console;
pub mod replica_client;
pub mod server;

pub use replica_client::ReplicaClient;
pub use server::Coordinator;
