//! Getter methods for Node

use std::path::Path;

use libp2p::{Multiaddr, PeerId};

use super::{
    handle::SwarmHandle,
    peer_node::{Lifecycle, Node},
};
use crate::{
    crypto::KeyPair,
    handlers::HandlerRegistry,
    network::with_peer_id,
    node::{
        config::NetworkSettings,
        mode::{Mode, NodeState},
    },
};

impl Node {
    /// Get the peer ID of this node
    pub fn peer_id(&self) -> PeerId {
        self.peer_id
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    pub fn storage_path(&self) -> Option<&Path> {
        self.storage_path.as_deref()
    }

    /// Configured listener addresses
    pub fn listeners(&self) -> &[Multiaddr] {
        &self.listeners
    }

    /// Resolved bootstrap addresses
    pub fn bootstrappers(&self) -> &[Multiaddr] {
        &self.bootstrappers
    }

    pub fn settings(&self) -> &NetworkSettings {
        &self.settings
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn state(&self) -> NodeState {
        match &*self.lifecycle.read() {
            Lifecycle::Constructed => NodeState::Constructed,
            Lifecycle::Running(running) => NodeState::Running(running.mode),
            Lifecycle::Stopped => NodeState::Stopped,
        }
    }

    /// The mode of the running swarm
    pub fn mode(&self) -> Option<Mode> {
        match self.state() {
            NodeState::Running(mode) => Some(mode),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state(), NodeState::Running(_))
    }

    /// First bound listen address with `/p2p/<peer id>` appended.
    ///
    /// `None` unless the node is running with at least one bound listener.
    pub fn listener_address(&self) -> Option<Multiaddr> {
        self.listener_addresses().into_iter().next()
    }

    /// Every bound listen address with `/p2p/<peer id>` appended
    pub fn listener_addresses(&self) -> Vec<Multiaddr> {
        let Some(handle) = self.swarm_handle() else {
            return Vec::new();
        };
        handle.listen_addrs().into_iter().map(|addr| with_peer_id(addr, self.peer_id)).collect()
    }

    pub(crate) fn swarm_handle(&self) -> Option<SwarmHandle> {
        match &*self.lifecycle.read() {
            Lifecycle::Running(running) => Some(running.handle.clone()),
            _ => None,
        }
    }
}
