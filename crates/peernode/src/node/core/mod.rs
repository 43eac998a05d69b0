//! Main peernode node implementation.
//!
//! This module contains the core Node struct and its methods.

mod call;
mod getters;
mod handle;
mod lifecycle;
mod node_methods;
mod peer_node;
mod run;

pub use peer_node::Node;
