//! Node configuration for peernode.
//!
//! This module defines the configuration options for peernode nodes.

mod methods;
mod types;

pub use types::{
    NetworkSettings, NodeConfig, NodeConfigBuilder, DEFAULT_IDLE_CONNECTION_TIMEOUT_MS,
    DEFAULT_MAX_CONCURRENT_STREAMS, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_START_TIMEOUT_MS,
};
