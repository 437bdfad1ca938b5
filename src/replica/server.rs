//! Replica server

use crate::common::{ReplicaConfig, Result};
use crate::replica::auction::AuctionState;
use crate::replica::http::{create_router, ReplicaState};
use crate::replica::timer::AuctionTimer;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub struct ReplicaServer {
    config: ReplicaConfig,
}

impl ReplicaServer {
    pub fn new(config: ReplicaConfig) -> Self {
        Self { config }
    }

    /// Bind the configured address and serve until Ctrl-C.
    pub async fn serve(self) -> Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        self.serve_on(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    /// The auction opens (and its timer starts) when this is called.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!("Starting auction replica");
        tracing::info!("  HTTP API: {}", addr);
        tracing::info!("  Duration: {:?}", self.config.duration());

        let auction = Arc::new(AuctionState::new(self.config.duration()));
        let _timer = AuctionTimer::start(&auction);

        let router = create_router(ReplicaState::new(auction));

        tracing::info!("✓ Replica ready on port {}", addr.port());

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Replica stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}
