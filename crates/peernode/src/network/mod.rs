//! Network module for peernode.
//!
//! This module contains all networking-related functionality including
//! the network behaviour, its events, and request bookkeeping.

pub mod behaviour;
pub mod conversions;
pub mod events;
pub mod helpers;
pub mod state;

// Re-export main types
pub use behaviour::PeerNodeBehaviour;
pub use events::PeerNodeEvent;
pub use helpers::{parse_multiaddr, peer_id_suffix, with_peer_id, without_peer_id};
pub use state::PendingCalls;
