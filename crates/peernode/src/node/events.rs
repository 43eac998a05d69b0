//! Logging of connection-level swarm events.
//!
//! Listener and behaviour events change node state and are handled by the
//! swarm task itself; everything else only needs to be traced.

use libp2p::swarm::SwarmEvent;
use tracing::{debug, info, warn};

use crate::network::PeerNodeEvent;

/// Log a swarm event the swarm task does not act on
pub(crate) fn log_swarm_event(event: &SwarmEvent<PeerNodeEvent>) {
    match event {
        SwarmEvent::IncomingConnection { local_addr, send_back_addr, .. } => {
            debug!("Incoming connection from {} to {}", send_back_addr, local_addr);
        },
        SwarmEvent::ConnectionEstablished { peer_id, endpoint, num_established, .. } => {
            info!(
                "Connection established with {} via {} ({} open)",
                peer_id,
                endpoint.get_remote_address(),
                num_established
            );
        },
        SwarmEvent::ConnectionClosed { peer_id, endpoint, cause, .. } => {
            info!(
                "Connection closed with {} via {} (cause: {:?})",
                peer_id,
                endpoint.get_remote_address(),
                cause
            );
        },
        SwarmEvent::OutgoingConnectionError { peer_id: Some(peer_id), error, .. } => {
            warn!("Outgoing connection error to {}: {}", peer_id, error);
        },
        SwarmEvent::OutgoingConnectionError { peer_id: None, error, .. } => {
            warn!("Outgoing connection error: {}", error);
        },
        SwarmEvent::IncomingConnectionError { local_addr, send_back_addr, error, .. } => {
            warn!(
                "Incoming connection error from {} to {}: {}",
                send_back_addr, local_addr, error
            );
        },
        SwarmEvent::Dialing { peer_id: Some(peer_id), .. } => {
            debug!("Dialing {}", peer_id);
        },
        SwarmEvent::ListenerError { listener_id, error } => {
            warn!("Listener {:?} error: {}", listener_id, error);
        },
        SwarmEvent::ExternalAddrConfirmed { address } => {
            info!("External address confirmed: {}", address);
        },
        other => debug!("Unhandled swarm event: {:?}", other),
    }
}
