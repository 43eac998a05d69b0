//! Swarm task: drives the swarm and serves commands from the node.
//!
//! The swarm is owned by a single task. The [`Node`](crate::Node) talks to it
//! through a [`SwarmHandle`]; inbound requests are dispatched on spawned
//! tasks whose responses come back over an internal channel.

use std::{collections::HashSet, ops::ControlFlow, sync::Arc, time::Duration};

use futures::StreamExt;
use libp2p::{
    core::transport::ListenerId, request_response::ResponseChannel, swarm::SwarmEvent, Multiaddr,
    Swarm,
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::handle::{SwarmCommand, SwarmHandle};
use crate::{
    error::{CallError, NodeError},
    handlers::HandlerRegistry,
    network::{peer_id_suffix, without_peer_id, PeerNodeBehaviour, PeerNodeEvent, PendingCalls},
    node::events::log_swarm_event,
    protocol::{ReqresResponse, Response},
};

const COMMAND_BUFFER: usize = 64;

type OutgoingResponse = (ResponseChannel<ReqresResponse>, ReqresResponse);

pub(crate) struct SwarmDriver {
    swarm: Swarm<PeerNodeBehaviour>,
    commands: mpsc::Receiver<SwarmCommand>,
    handlers: Arc<HandlerRegistry>,
    responses_tx: mpsc::UnboundedSender<OutgoingResponse>,
    responses_rx: mpsc::UnboundedReceiver<OutgoingResponse>,
    pending: PendingCalls,
    listen_addrs: watch::Sender<Vec<Multiaddr>>,
}

impl SwarmDriver {
    pub(crate) fn new(
        swarm: Swarm<PeerNodeBehaviour>,
        handlers: Arc<HandlerRegistry>,
    ) -> (Self, SwarmHandle) {
        let (commands_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        let (listen_addrs, listen_addrs_rx) = watch::channel(Vec::new());

        let driver = Self {
            swarm,
            commands,
            handlers,
            responses_tx,
            responses_rx,
            pending: PendingCalls::new(),
            listen_addrs,
        };
        (driver, SwarmHandle::new(commands_tx, listen_addrs_rx))
    }

    /// Bind every address in `listeners` and wait until each one reports a
    /// listen address.
    ///
    /// Any listener that fails or does not bind within `timeout` fails the
    /// whole start; dropping the driver then releases whatever did bind.
    pub(crate) async fn start_listening(
        &mut self,
        listeners: &[Multiaddr],
        timeout: Duration,
    ) -> Result<(), NodeError> {
        let mut waiting: HashSet<ListenerId> = HashSet::new();
        for addr in listeners {
            let listener_id = self
                .swarm
                .listen_on(addr.clone())
                .map_err(|e| NodeError::SwarmStart(format!("cannot listen on {addr}: {e}")))?;
            waiting.insert(listener_id);
        }

        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        while !waiting.is_empty() {
            tokio::select! {
                event = self.swarm.select_next_some() => {
                    match &event {
                        SwarmEvent::NewListenAddr { listener_id, .. } => {
                            waiting.remove(listener_id);
                        },
                        SwarmEvent::ListenerClosed { listener_id, reason, .. }
                            if waiting.contains(listener_id) =>
                        {
                            return Err(NodeError::SwarmStart(format!(
                                "listener closed before binding: {reason:?}"
                            )));
                        },
                        SwarmEvent::ListenerError { listener_id, error }
                            if waiting.contains(listener_id) =>
                        {
                            return Err(NodeError::SwarmStart(format!("listener failed: {error}")));
                        },
                        _ => {},
                    }
                    self.handle_swarm_event(event);
                }
                _ = &mut deadline => {
                    return Err(NodeError::SwarmStart(format!(
                        "{} listener(s) not bound after {:?}",
                        waiting.len(),
                        timeout
                    )));
                }
            }
        }

        Ok(())
    }

    /// Record the bootstrap addresses and dial them
    pub(crate) fn dial_bootstrappers(&mut self, bootstrappers: &[Multiaddr]) {
        for addr in bootstrappers {
            if let Some(peer) = peer_id_suffix(addr) {
                self.swarm.add_peer_address(peer, without_peer_id(addr));
            }

            match self.swarm.dial(addr.clone()) {
                Ok(()) => debug!("Dialing bootstrapper {}", addr),
                Err(e) => warn!("Failed to dial bootstrapper {}: {}", addr, e),
            }
        }
    }

    /// Run until shutdown is requested or every handle is dropped
    pub(crate) async fn run(mut self) {
        info!("Swarm task started for {}", self.swarm.local_peer_id());
        loop {
            tokio::select! {
                event = self.swarm.select_next_some() => self.handle_swarm_event(event),
                command = self.commands.recv() => {
                    let Some(command) = command else { break };
                    if self.handle_command(command).is_break() {
                        break;
                    }
                }
                Some((channel, response)) = self.responses_rx.recv() => {
                    self.send_response(channel, response);
                }
            }
        }
        self.shutdown();
    }

    fn handle_command(&mut self, command: SwarmCommand) -> ControlFlow<()> {
        match command {
            SwarmCommand::Call { peer, address, request, reply } => {
                if let Some(address) = address {
                    self.swarm.add_peer_address(peer, address);
                }
                let path = request.path.clone();
                let request_id =
                    self.swarm.behaviour_mut().request_response.send_request(&peer, request);
                debug!("Sent {} request {} to {}", path, request_id, peer);
                self.pending.insert(request_id, peer, reply);
            },
            SwarmCommand::AddAddresses { peer, addresses } => {
                debug!("Adding {} address(es) for {}", addresses.len(), peer);
                for address in addresses {
                    self.swarm.add_peer_address(peer, address);
                }
            },
            SwarmCommand::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn handle_swarm_event(&mut self, event: SwarmEvent<PeerNodeEvent>) {
        match event {
            SwarmEvent::Behaviour(event) => self.handle_behaviour_event(event),
            SwarmEvent::NewListenAddr { address, .. } => {
                info!("Listening on {}", address);
                self.listen_addrs.send_modify(|addrs| {
                    if !addrs.contains(&address) {
                        addrs.push(address.clone());
                    }
                });
            },
            SwarmEvent::ExpiredListenAddr { address, .. } => {
                debug!("Listen address expired: {}", address);
                self.listen_addrs.send_modify(|addrs| addrs.retain(|a| *a != address));
            },
            SwarmEvent::ListenerClosed { addresses, reason, .. } => {
                debug!("Listener closed ({:?}), releasing {:?}", reason, addresses);
                self.listen_addrs.send_modify(|addrs| addrs.retain(|a| !addresses.contains(a)));
            },
            other => log_swarm_event(&other),
        }
    }

    fn handle_behaviour_event(&mut self, event: PeerNodeEvent) {
        match event {
            PeerNodeEvent::RequestReceived { peer, request_id, request, channel } => {
                debug!("Received {} request {} from {}", request.path, request_id, peer);
                let handlers = Arc::clone(&self.handlers);
                let responses = self.responses_tx.clone();
                tokio::spawn(async move {
                    let response = handlers.dispatch(peer, request).await;
                    // The swarm task may already be gone.
                    let _ = responses.send((channel, response));
                });
            },
            PeerNodeEvent::ResponseReceived { peer, request_id, response } => {
                debug!("Received response {} from {} (ok: {})", request_id, peer, response.ok);
                if !self.pending.complete(request_id, Response::from(response)) {
                    debug!("Response {} from {} matches no pending call", request_id, peer);
                }
            },
            PeerNodeEvent::OutboundFailure { peer, request_id, error } => {
                warn!("Request {} to {} failed: {}", request_id, peer, error);
                self.pending.complete(request_id, Response::Failed(CallError::from(error)));
            },
            PeerNodeEvent::InboundFailure { peer, request_id, error } => {
                warn!("Inbound request {} from {} failed: {}", request_id, peer, error);
            },
            PeerNodeEvent::ResponseSent { peer, request_id } => {
                debug!("Response {} sent to {}", request_id, peer);
            },
        }
    }

    fn send_response(&mut self, channel: ResponseChannel<ReqresResponse>, response: ReqresResponse) {
        if self.swarm.behaviour_mut().request_response.send_response(channel, response).is_err() {
            warn!("Could not send response: the requesting connection is gone");
        }
    }

    fn shutdown(mut self) {
        let pending = self.pending.len();
        self.pending.fail_all(Response::Failed(CallError::ConnectionFailed(
            "node stopped".to_string(),
        )));
        self.listen_addrs.send_replace(Vec::new());
        info!(
            "Swarm task for {} stopped ({} pending call(s) failed)",
            self.swarm.local_peer_id(),
            pending
        );
    }
}
