//! Node configuration types for peernode.
//!
//! This module defines the configuration data structures for peernode nodes.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_IDLE_CONNECTION_TIMEOUT_MS: u64 = 60_000;
pub const DEFAULT_START_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_MAX_CONCURRENT_STREAMS: usize = 64;

/// Configuration options for a peernode node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Path to the passfile holding the node's key material
    pub passfile_path: PathBuf,

    /// Directory for swarm state; not interpreted by the node itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// Addresses to bind in server mode
    #[serde(default)]
    pub listeners: Vec<String>,

    /// Peers to dial at startup; `/dns`, `/dns4` and `/dns6` entries are resolved
    #[serde(default)]
    pub bootstrappers: Vec<String>,

    #[serde(default)]
    pub network: NetworkSettings,
}

/// Swarm tuning knobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSettings {
    /// Per-request timeout applied by the request-response behaviour and `call`
    pub request_timeout_ms: u64,

    pub idle_connection_timeout_ms: u64,

    /// How long `setup` waits for every listener to bind
    pub start_timeout_ms: u64,

    pub max_concurrent_streams: usize,

    /// Dial the resolved bootstrap peers right after startup
    pub dial_bootstrappers: bool,
}

impl Default for NetworkSettings {
    fn default() -> Self {
        Self {
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            idle_connection_timeout_ms: DEFAULT_IDLE_CONNECTION_TIMEOUT_MS,
            start_timeout_ms: DEFAULT_START_TIMEOUT_MS,
            max_concurrent_streams: DEFAULT_MAX_CONCURRENT_STREAMS,
            dial_bootstrappers: true,
        }
    }
}

impl NodeConfig {
    /// Create a new configuration builder
    pub fn builder(passfile_path: impl Into<PathBuf>) -> NodeConfigBuilder {
        NodeConfigBuilder { config: NodeConfig::new(passfile_path) }
    }
}

/// Builder for NodeConfig
pub struct NodeConfigBuilder {
    pub(crate) config: NodeConfig,
}

pub(crate) fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
