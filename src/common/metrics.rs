//! Replica counters exposed in Prometheus text format on `/metrics`

use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Monotonic counter
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicU64,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
        }
    }

    pub fn inc(&self) {
        self.value.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Per-replica request and outcome counters
#[derive(Debug)]
pub struct ReplicaMetrics {
    pub bids_accepted: Counter,
    pub bids_rejected: Counter,
    pub bids_after_close: Counter,
    pub queries: Counter,
    pub invalid_requests: Counter,

    start_time: Instant,
}

impl ReplicaMetrics {
    pub fn new() -> Self {
        Self {
            bids_accepted: Counter::new(),
            bids_rejected: Counter::new(),
            bids_after_close: Counter::new(),
            queries: Counter::new(),
            invalid_requests: Counter::new(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Generate Prometheus-compatible metrics output
    pub fn to_prometheus(&self) -> String {
        let mut out = String::new();

        out.push_str("# HELP minibid_bids_total Bids received, by outcome\n");
        out.push_str("# TYPE minibid_bids_total counter\n");
        for (outcome, counter) in [
            ("success", &self.bids_accepted),
            ("fail", &self.bids_rejected),
            ("auction_ended", &self.bids_after_close),
        ] {
            // Writing into a String cannot fail.
            let _ = writeln!(
                out,
                "minibid_bids_total{{outcome=\"{}\"}} {}",
                outcome,
                counter.get()
            );
        }

        out.push_str("# HELP minibid_queries_total Status queries served\n");
        out.push_str("# TYPE minibid_queries_total counter\n");
        let _ = writeln!(out, "minibid_queries_total {}", self.queries.get());

        out.push_str("# HELP minibid_invalid_requests_total Requests rejected as malformed\n");
        out.push_str("# TYPE minibid_invalid_requests_total counter\n");
        let _ = writeln!(
            out,
            "minibid_invalid_requests_total {}",
            self.invalid_requests.get()
        );

        out.push_str("# HELP minibid_uptime_seconds Replica uptime in seconds\n");
        out.push_str("# TYPE minibid_uptime_seconds gauge\n");
        let _ = writeln!(out, "minibid_uptime_seconds {}", self.uptime_seconds());

        out
    }
}

impl Default for ReplicaMetrics {
    fn default() -> Self {
        Self::new()
    }
}
