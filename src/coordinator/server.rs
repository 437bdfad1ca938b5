//! Coordinator: bid fan-out and first-success query
//!
//! Replicas are never reconciled. A bid goes to every replica and each one
//! decides on its own; their highest bids may diverge for good. A query walks
//! the replicas in configured order and returns the first answer untouched.

use crate::common::wire::{BidRequest, BidResponse, QueryResponse};
use crate::common::{CoordinatorConfig, Error, Result};
use crate::coordinator::replica_client::ReplicaClient;
use futures_util::future::join_all;
use std::time::Duration;

pub struct Coordinator {
    replicas: Vec<ReplicaClient>,
    query_timeout: Duration,
    bid_timeout: Option<Duration>,
}

impl Coordinator {
    pub fn new(config: &CoordinatorConfig) -> Result<Self> {
        config.validate()?;

        // Replicas are direct peers; never route them through a proxy.
        let http = reqwest::Client::builder().no_proxy().build()?;
        let replicas = config
            .replicas
            .iter()
            .map(|url| ReplicaClient::new(url.clone(), http.clone()))
            .collect();

        Ok(Self {
            replicas,
            query_timeout: config.query_timeout(),
            bid_timeout: config.bid_timeout(),
        })
    }

    /// Replica base URLs in fallthrough order
    pub fn replicas(&self) -> impl Iterator<Item = &str> {
        self.replicas.iter().map(ReplicaClient::url)
    }

    /// Send the bid to every replica. Failures are logged per replica and
    /// never reported back; there is no aggregate result.
    pub async fn bid(&self, name: &str, amount: i64) {
        let req = BidRequest::new(name, amount);
        tracing::info!(
            bidder = name,
            amount,
            replicas = self.replicas.len(),
            "Broadcasting bid"
        );

        join_all(
            self.replicas
                .iter()
                .map(|replica| self.bid_one(replica, &req)),
        )
        .await;

        tracing::info!("Bid request completed");
    }

    async fn bid_one(&self, replica: &ReplicaClient, req: &BidRequest) {
        match replica.bid(req, self.bid_timeout).await {
            Ok(BidResponse::Success) => {
                tracing::info!(replica = %replica.url(), bidder = %req.name, "Replica accepted bid");
            }
            Ok(BidResponse::Fail { reason }) => {
                tracing::info!(replica = %replica.url(), bidder = %req.name, %reason, "Replica rejected bid");
            }
            Ok(BidResponse::AuctionEnded) => {
                tracing::info!(replica = %replica.url(), bidder = %req.name, "Replica auction already ended");
            }
            Err(e) => {
                tracing::warn!(replica = %replica.url(), error = %e, "Error sending bid to replica");
            }
        }
    }

    /// Ask replicas in order; the first successful answer wins.
    ///
    /// The answer is decoded into the shared [`QueryResponse`] schema, so
    /// fields a replica sends outside that schema are not carried through.
    pub async fn query(&self) -> Result<QueryResponse> {
        for replica in &self.replicas {
            match replica.query(self.query_timeout).await {
                Ok(status) => {
                    tracing::info!(replica = %replica.url(), ?status, "Data from replica");
                    return Ok(status);
                }
                Err(e) => {
                    tracing::warn!(replica = %replica.url(), error = %e, "Error querying replica");
                }
            }
        }

        tracing::error!("Failed to query all replicas");
        Err(Error::AllReplicasFailed {
            attempted: self.replicas.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_replica_order() {
        let config = CoordinatorConfig {
            replicas: vec![
                "http://b.example:8081".into(),
                "http://a.example:8080/".into(),
            ],
            ..Default::default()
        };
        let coordinator = Coordinator::new(&config).unwrap();
        let urls: Vec<_> = coordinator.replicas().collect();
        assert_eq!(urls, vec!["http://b.example:8081", "http://a.example:8080"]);
    }

    #[test]
    fn test_new_rejects_empty_replica_list() {
        let config = CoordinatorConfig {
            replicas: vec![],
            ..Default::default()
        };
        assert!(matches!(
            Coordinator::new(&config),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_all_unreachable_is_total_failure() {
        let config = CoordinatorConfig {
            replicas: vec!["http://127.0.0.1:1".into(), "http://127.0.0.1:1".into()],
            query_timeout_ms: 500,
            ..Default::default()
        };
        let coordinator = Coordinator::new(&config).unwrap();

        // A bid to dead replicas just returns.
        coordinator.bid("alice", 100).await;

        match coordinator.query().await {
            Err(Error::AllReplicasFailed { attempted }) => assert_eq!(attempted, 2),
            other => panic!("expected total failure, got {:?}", other),
        }
    }
}
