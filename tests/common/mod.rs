//! Helpers for spinning up replicas on ephemeral ports

#![allow(dead_code)]

use axum::Router;
use minibid::common::ReplicaConfig;
use minibid::ReplicaServer;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct TestReplica {
    pub url: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<minibid::Result<()>>>,
}

impl TestReplica {
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.await.unwrap().unwrap();
        }
    }
}

impl Drop for TestReplica {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn spawn_replica(duration_secs: u64) -> TestReplica {
    spawn_replica_for(Duration::from_secs(duration_secs)).await
}

pub async fn spawn_replica_for(duration: Duration) -> TestReplica {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel::<()>();

    let config = ReplicaConfig {
        bind_addr: addr,
        ..Default::default()
    }
    .with_duration(duration)
    .unwrap();
    let handle = tokio::spawn(ReplicaServer::new(config).serve_on(listener, async move {
        let _ = rx.await;
    }));

    TestReplica {
        url: format!("http://{}", addr),
        shutdown: Some(tx),
        handle: Some(handle),
    }
}

/// Serve an arbitrary router, for replicas that misbehave on purpose.
pub async fn spawn_stub(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// An address nothing is listening on.
pub async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
