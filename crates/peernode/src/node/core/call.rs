//! Outbound requests and the peer address book.

use std::time::Duration;

use libp2p::{Multiaddr, PeerId};
use tokio::sync::oneshot;
use tracing::debug;

use super::{handle::SwarmCommand, peer_node::Node};
use crate::{
    error::{CallError, NodeError},
    network::{peer_id_suffix, without_peer_id},
    protocol::{ReqresRequest, Response},
};

impl Node {
    /// Send `payload` to the handler at `protocol_id` on the peer at `target`.
    ///
    /// `target` must end in `/p2p/<peer id>`. Failures never surface as an
    /// `Err`; they come back as [`Response::Failed`]. Waits at most the
    /// configured request timeout.
    pub async fn call(
        &self,
        target: &Multiaddr,
        protocol_id: &str,
        payload: impl Into<Vec<u8>>,
    ) -> Response {
        self.call_with_timeout(target, protocol_id, payload, self.settings.request_timeout()).await
    }

    /// Like [`call`](Node::call) with an explicit deadline.
    ///
    /// A response that arrives after the deadline is discarded.
    pub async fn call_with_timeout(
        &self,
        target: &Multiaddr,
        protocol_id: &str,
        payload: impl Into<Vec<u8>>,
        timeout: Duration,
    ) -> Response {
        let Some(handle) = self.swarm_handle() else {
            return CallError::NotRunning.into();
        };
        let Some(peer) = peer_id_suffix(target) else {
            return CallError::InvalidTarget(format!("{target} does not end in /p2p/<peer id>"))
                .into();
        };

        let address = without_peer_id(target);
        let address = (!address.is_empty()).then_some(address);
        let request = ReqresRequest { path: protocol_id.to_string(), data: payload.into() };

        let (reply, response) = oneshot::channel();
        let exchange = async {
            if !handle.send(SwarmCommand::Call { peer, address, request, reply }).await {
                return CallError::NotRunning.into();
            }
            match response.await {
                Ok(response) => response,
                Err(_) => CallError::ConnectionFailed(
                    "swarm stopped before a response arrived".to_string(),
                )
                .into(),
            }
        };

        // The deadline covers queueing behind a busy swarm as well as the exchange.
        match tokio::time::timeout(timeout, exchange).await {
            Ok(response) => response,
            Err(_) => {
                debug!("Call to {} on {} timed out after {:?}", peer, protocol_id, timeout);
                CallError::Timeout.into()
            },
        }
    }

    /// Teach the running swarm where `peer` can be reached.
    ///
    /// A trailing `/p2p/` component on any address is dropped.
    pub async fn save_peer_addresses(
        &self,
        peer: PeerId,
        addresses: Vec<Multiaddr>,
    ) -> Result<(), NodeError> {
        let handle = self.swarm_handle().ok_or(NodeError::NotRunning)?;
        let addresses = addresses.iter().map(without_peer_id).collect();

        if handle.send(SwarmCommand::AddAddresses { peer, addresses }).await {
            Ok(())
        } else {
            Err(NodeError::NotRunning)
        }
    }
}
