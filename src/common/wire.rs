//! JSON wire types shared by replicas and the coordinator

use serde::{Deserialize, Serialize};

/// Body of `POST /bid`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidRequest {
    pub name: String,
    /// Any JSON number; replicas truncate it to an integer.
    pub amount: f64,
}

impl BidRequest {
    pub fn new(name: impl Into<String>, amount: i64) -> Self {
        Self {
            name: name.into(),
            amount: amount as f64,
        }
    }

    /// Decode and validate a raw request body.
    pub fn from_slice(body: &[u8]) -> crate::Result<Self> {
        let req: BidRequest = serde_json::from_slice(body)
            .map_err(|e| crate::Error::InvalidRequest(e.to_string()))?;
        if !req.amount.is_finite() {
            return Err(crate::Error::InvalidRequest(
                "amount must be a finite number".into(),
            ));
        }
        Ok(req)
    }
}

/// Body returned by `POST /bid` with a 200 status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome")]
pub enum BidResponse {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "fail")]
    Fail { reason: String },
    #[serde(rename = "auction ended")]
    AuctionEnded,
}

/// Auction lifecycle as seen on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuctionStatus {
    Ongoing,
    Ended,
}

impl std::fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuctionStatus::Ongoing => write!(f, "ongoing"),
            AuctionStatus::Ended => write!(f, "ended"),
        }
    }
}

/// Body returned by `GET /query`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub status: AuctionStatus,
    pub highest_bid: i64,
    pub highest_bidder: String,
    /// Seconds; negative if read after expiry but before the close fired
    pub time_remaining: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}
