//! Transport setup for peernode.
//!
//! This module builds the libp2p swarm: TCP with DNS resolution, noise
//! authentication and yamux multiplexing under the node's own identity.

use libp2p::{identity::Keypair, noise, tcp, yamux, Swarm};

use crate::{
    error::NodeError,
    network::PeerNodeBehaviour,
    node::config::NetworkSettings,
};

/// Build the swarm for a node authenticated as `keypair`
pub fn build_swarm(
    keypair: Keypair,
    settings: &NetworkSettings,
) -> Result<Swarm<PeerNodeBehaviour>, NodeError> {
    let behaviour = PeerNodeBehaviour::new(settings);
    let idle_timeout = settings.idle_connection_timeout();

    let swarm = libp2p::SwarmBuilder::with_existing_identity(keypair)
        .with_tokio()
        .with_tcp(
            tcp::Config::default().nodelay(true),
            noise::Config::new,
            yamux::Config::default,
        )
        .map_err(|e| NodeError::SwarmStart(format!("tcp transport: {e}")))?
        .with_dns()
        .map_err(|e| NodeError::SwarmStart(format!("dns transport: {e}")))?
        .with_behaviour(|_| behaviour)
        .map_err(|e| NodeError::SwarmStart(format!("behaviour: {e}")))?
        .with_swarm_config(|c| c.with_idle_connection_timeout(idle_timeout))
        .build();

    Ok(swarm)
}
