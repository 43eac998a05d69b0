//! Node module for peernode.
//!
//! This module contains all node-related functionality including
//! configuration, lifecycle, and swarm event handling.

pub mod config;
pub mod core;
pub mod events;
pub mod mode;

// Re-export main types
pub use config::{NetworkSettings, NodeConfig, NodeConfigBuilder};
pub use core::Node;
pub use mode::{Mode, NodeState, ParseModeError};
