//! Node struct definition.

use std::path::PathBuf;

use libp2p::{multiaddr::Multiaddr, PeerId};
use parking_lot::RwLock;
use tokio::{sync::Mutex, task::JoinHandle};

use super::handle::SwarmHandle;
use crate::{
    crypto::KeyPair,
    handlers::HandlerRegistry,
    node::{config::NetworkSettings, mode::Mode},
};

/// A peernode network node.
///
/// Built from a [`NodeConfig`](crate::NodeConfig), started with
/// [`setup`](Node::setup) and shut down with [`stop`](Node::stop). A stopped
/// node may be set up again.
pub struct Node {
    pub(crate) peer_id: PeerId,

    pub(crate) keypair: KeyPair,

    pub(crate) storage_path: Option<PathBuf>,

    /// Parsed listener addresses, bound only in server mode
    pub(crate) listeners: Vec<Multiaddr>,

    /// Resolved bootstrap addresses, self already excluded
    pub(crate) bootstrappers: Vec<Multiaddr>,

    pub(crate) settings: NetworkSettings,

    /// Handlers handed to the swarm at the next `setup`
    pub(crate) handlers: HandlerRegistry,

    /// Serializes `setup` and `stop`
    pub(crate) transition: Mutex<()>,

    pub(crate) lifecycle: RwLock<Lifecycle>,
}

pub(crate) enum Lifecycle {
    Constructed,
    Running(RunningSwarm),
    Stopped,
}

/// A swarm driven by a background task
pub(crate) struct RunningSwarm {
    pub(crate) mode: Mode,
    pub(crate) handle: SwarmHandle,
    pub(crate) task: JoinHandle<()>,
}

impl Node {
    pub(crate) fn new_internal(
        keypair: KeyPair,
        peer_id: PeerId,
        storage_path: Option<PathBuf>,
        listeners: Vec<Multiaddr>,
        bootstrappers: Vec<Multiaddr>,
        settings: NetworkSettings,
    ) -> Self {
        Self {
            peer_id,
            keypair,
            storage_path,
            listeners,
            bootstrappers,
            settings,
            handlers: HandlerRegistry::new(),
            transition: Mutex::new(()),
            lifecycle: RwLock::new(Lifecycle::Constructed),
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("peer_id", &self.peer_id)
            .field("state", &self.state())
            .field("listeners", &self.listeners)
            .field("bootstrappers", &self.bootstrappers)
            .finish_non_exhaustive()
    }
}
