//! Network helpers and utilities for peernode.
//!
//! This module provides helper functions for multiaddr handling.

use libp2p::{multiaddr::Protocol, Multiaddr, PeerId};

use crate::error::NodeError;

/// Extract the peer ID from a trailing `/p2p/` component
pub fn peer_id_suffix(addr: &Multiaddr) -> Option<PeerId> {
    match addr.iter().last() {
        Some(Protocol::P2p(peer_id)) => Some(peer_id),
        _ => None,
    }
}

/// Strip a trailing `/p2p/` component, if any
pub fn without_peer_id(addr: &Multiaddr) -> Multiaddr {
    let mut addr = addr.clone();
    if let Some(Protocol::P2p(_)) = addr.iter().last() {
        addr.pop();
    }
    addr
}

/// Append `/p2p/<peer_id>` unless the address already ends with it
pub fn with_peer_id(addr: Multiaddr, peer_id: PeerId) -> Multiaddr {
    if peer_id_suffix(&addr) == Some(peer_id) {
        return addr;
    }
    without_peer_id(&addr).with(Protocol::P2p(peer_id))
}

/// Parse a configured address string
pub fn parse_multiaddr(raw: &str) -> Result<Multiaddr, NodeError> {
    raw.trim().parse().map_err(|e: libp2p::multiaddr::Error| NodeError::InvalidAddress {
        addr: raw.to_string(),
        reason: e.to_string(),
    })
}
