//! Configuration for minibid components

use crate::common::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "minibid.toml";

/// Prefix for environment overrides (`MINIBID_LOG_LEVEL`, `MINIBID_REPLICA__BIND_ADDR`, ...)
pub const ENV_PREFIX: &str = "MINIBID";

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Replica-specific config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica: Option<ReplicaConfig>,

    /// Coordinator-specific config
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinator: Option<CoordinatorConfig>,

    /// Logging level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Operational log file (appended to)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load `minibid.toml` (if present) and `MINIBID_*` environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from an explicit file path; a missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("coordinator.replicas"),
            )
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(replica) = &self.replica {
            replica.validate()?;
        }
        if let Some(coord) = &self.coordinator {
            coord.validate()?;
        }
        Ok(())
    }
}

/// Replica configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplicaConfig {
    /// Bind address for the HTTP API
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,

    /// How long the auction stays open, in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
fn default_duration_ms() -> u64 {
    100_000
}

impl ReplicaConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Same config with the auction running for exactly `duration`.
    pub fn with_duration(mut self, duration: Duration) -> Result<Self> {
        let millis = u64::try_from(duration.as_millis())
            .map_err(|_| crate::Error::InvalidConfig("auction duration too large".into()))?;
        if millis == 0 || Duration::from_millis(millis) != duration {
            return Err(crate::Error::InvalidConfig(format!(
                "auction duration must be a non-zero whole number of milliseconds: {:?}",
                duration
            )));
        }
        self.duration_ms = millis;
        Ok(self)
    }

    /// Apply command-line overrides; anything given there wins over the file.
    pub fn merge_cli(
        mut self,
        bind: Option<SocketAddr>,
        port: Option<u16>,
        duration: Option<Duration>,
    ) -> Result<Self> {
        if let Some(bind) = bind {
            self.bind_addr = bind;
        }
        if let Some(port) = port {
            self = self.with_port(port);
        }
        if let Some(duration) = duration {
            self = self.with_duration(duration)?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.duration_ms == 0 {
            return Err(crate::Error::InvalidConfig(
                "auction duration must be non-zero".into(),
            ));
        }
        Ok(())
    }

    /// Same config listening on `port` on all interfaces.
    pub fn with_port(mut self, port: u16) -> Self {
        self.bind_addr.set_port(port);
        self
    }
}

impl Default for ReplicaConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            duration_ms: default_duration_ms(),
        }
    }
}

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// Replica base URLs, in query fallthrough order
    #[serde(default = "default_replicas")]
    pub replicas: Vec<String>,

    /// Per-attempt bound for a query
    #[serde(default = "default_query_timeout")]
    pub query_timeout_ms: u64,

    /// Per-replica bound for a bid; unset means the HTTP client default
    #[serde(default)]
    pub bid_timeout_ms: Option<u64>,
}

fn default_replicas() -> Vec<String> {
    vec![
        "http://localhost:8080".to_string(),
        "http://localhost:8081".to_string(),
    ]
}
fn default_query_timeout() -> u64 {
    2_000
}

impl CoordinatorConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn bid_timeout(&self) -> Option<Duration> {
        self.bid_timeout_ms.map(Duration::from_millis)
    }

    pub fn validate(&self) -> Result<()> {
        if self.replicas.is_empty() {
            return Err(crate::Error::InvalidConfig(
                "coordinator needs at least one replica".into(),
            ));
        }
        for replica in &self.replicas {
            if !(replica.starts_with("http://") || replica.starts_with("https://")) {
                return Err(crate::Error::InvalidConfig(format!(
                    "replica address must be an http(s) URL: {}",
                    replica
                )));
            }
        }
        if self.query_timeout_ms == 0 {
            return Err(crate::Error::InvalidConfig(
                "query timeout must be non-zero".into(),
            ));
        }
        if self.bid_timeout_ms == Some(0) {
            return Err(crate::Error::InvalidConfig(
                "bid timeout must be non-zero when set".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            replicas: default_replicas(),
            query_timeout_ms: default_query_timeout(),
            bid_timeout_ms: None,
        }
    }
}
