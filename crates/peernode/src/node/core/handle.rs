//! Channel handle into a running swarm task.

use libp2p::{Multiaddr, PeerId};
use tokio::sync::{mpsc, oneshot, watch};

use crate::protocol::{ReqresRequest, Response};

/// Commands accepted by the swarm task
pub(crate) enum SwarmCommand {
    /// Send `request` to `peer`, dialing `address` if not yet connected
    Call {
        peer: PeerId,
        address: Option<Multiaddr>,
        request: ReqresRequest,
        reply: oneshot::Sender<Response>,
    },
    AddAddresses {
        peer: PeerId,
        addresses: Vec<Multiaddr>,
    },
    Shutdown,
}

#[derive(Clone)]
pub(crate) struct SwarmHandle {
    commands: mpsc::Sender<SwarmCommand>,
    listen_addrs: watch::Receiver<Vec<Multiaddr>>,
}

impl SwarmHandle {
    pub(crate) fn new(
        commands: mpsc::Sender<SwarmCommand>,
        listen_addrs: watch::Receiver<Vec<Multiaddr>>,
    ) -> Self {
        Self { commands, listen_addrs }
    }

    /// Returns `false` once the swarm task has exited.
    pub(crate) async fn send(&self, command: SwarmCommand) -> bool {
        self.commands.send(command).await.is_ok()
    }

    pub(crate) async fn shutdown(&self) {
        let _ = self.commands.send(SwarmCommand::Shutdown).await;
    }

    /// Addresses currently bound, in bind order
    pub(crate) fn listen_addrs(&self) -> Vec<Multiaddr> {
        self.listen_addrs.borrow().clone()
    }
}
