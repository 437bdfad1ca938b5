use crate::common::wire::{BidRequest, BidResponse, QueryResponse};
use crate::common::{Error, Result};
use std::time::Duration;

/// HTTP client for a single replica
#[derive(Debug, Clone)]
pub struct ReplicaClient {
    base_url: String,
    http: reqwest::Client,
}

impl ReplicaClient {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn url(&self) -> &str {
        &self.base_url
    }

    /// POST the bid. `timeout` of `None` leaves the client default in place.
    pub async fn bid(&self, req: &BidRequest, timeout: Option<Duration>) -> Result<BidResponse> {
        let mut request = self.http.post(format!("{}/bid", self.base_url)).json(req);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        self.check_status(response.status())?;

        response
            .json::<BidResponse>()
            .await
            .map_err(|e| Error::Decode(format!("{}: {}", self.base_url, e)))
    }

    pub async fn query(&self, timeout: Duration) -> Result<QueryResponse> {
        let response = self
            .http
            .get(format!("{}/query", self.base_url))
            .timeout(timeout)
            .send()
            .await?;
        self.check_status(response.status())?;

        response
            .json::<QueryResponse>()
            .await
            .map_err(|e| Error::Decode(format!("{}: {}", self.base_url, e)))
    }

    fn check_status(&self, status: reqwest::StatusCode) -> Result<()> {
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::UnexpectedStatus {
                replica: self.base_url.clone(),
                status: status.as_u16(),
            })
        }
    }
}
