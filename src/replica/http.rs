//! HTTP API for a replica
//!
//! `POST /bid` and `GET /query` adapt wire payloads onto [`AuctionState`].
//! Bodies are decoded here, so malformed requests are answered with 400
//! before the auction is touched. Wrong methods get 405 from the router.

use crate::common::metrics::ReplicaMetrics;
use crate::common::tracing_middleware::request_tracing_middleware;
use crate::common::utils::truncate_amount;
use crate::common::wire::{BidRequest, BidResponse, QueryResponse};
use crate::common::Error;
use crate::replica::auction::{AuctionState, BidOutcome};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::limit::RequestBodyLimitLayer;

/// Bids are a few dozen bytes; anything near this is not a bid.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared replica state for HTTP handlers.
#[derive(Clone)]
pub struct ReplicaState {
    pub auction: Arc<AuctionState>,
    pub metrics: Arc<ReplicaMetrics>,
}

impl ReplicaState {
    pub fn new(auction: Arc<AuctionState>) -> Self {
        Self {
            auction,
            metrics: Arc::new(ReplicaMetrics::new()),
        }
    }
}

pub fn create_router(state: ReplicaState) -> Router {
    Router::new()
        .route("/bid", post(place_bid))
        .route("/query", get(query))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(request_tracing_middleware))
        .with_state(state)
}

async fn place_bid(
    State(state): State<ReplicaState>,
    body: Bytes,
) -> Result<Json<BidResponse>, Error> {
    let req = BidRequest::from_slice(&body).inspect_err(|e| {
        state.metrics.invalid_requests.inc();
        tracing::warn!(error = %e, "Failed to decode bid request");
    })?;

    let outcome = state
        .auction
        .place_bid(&req.name, truncate_amount(req.amount));
    record_outcome(&state.metrics, &outcome);

    Ok(Json(outcome.into()))
}

fn record_outcome(metrics: &ReplicaMetrics, outcome: &BidOutcome) {
    match outcome {
        BidOutcome::Accepted => metrics.bids_accepted.inc(),
        BidOutcome::Rejected(_) => metrics.bids_rejected.inc(),
        BidOutcome::AuctionEnded => metrics.bids_after_close.inc(),
    }
}

async fn query(State(state): State<ReplicaState>) -> Json<QueryResponse> {
    let snapshot = state.auction.status();
    state.metrics.queries.inc();
    tracing::info!(
        status = %snapshot.status,
        highest_bid = snapshot.highest_bid,
        highest_bidder = %snapshot.highest_bidder,
        "Status queried"
    );
    Json(snapshot.into())
}

async fn health(State(state): State<ReplicaState>) -> impl IntoResponse {
    let snapshot = state.auction.status();
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "version": crate::VERSION,
            "started_at": state.auction.started_at().to_rfc3339(),
            "auction": snapshot.status,
        })),
    )
}

async fn metrics(State(state): State<ReplicaState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.to_prometheus(),
    )
}
