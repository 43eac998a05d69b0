//! Network behaviour for peernode.
//!
//! This module defines the libp2p NetworkBehaviour for peernode.

use libp2p::{
    request_response::{self, ProtocolSupport},
    swarm::NetworkBehaviour,
    StreamProtocol,
};

use super::events::PeerNodeEvent;
use crate::{
    node::config::NetworkSettings,
    protocol::{ReqresCodec, REQRES_PROTOCOL},
};

/// The network behaviour driven by every node
#[derive(NetworkBehaviour)]
#[behaviour(to_swarm = "PeerNodeEvent")]
pub struct PeerNodeBehaviour {
    /// Request/response protocol carrying every handler path
    pub request_response: request_response::Behaviour<ReqresCodec>,
}

impl PeerNodeBehaviour {
    /// Create a new PeerNodeBehaviour
    pub fn new(settings: &NetworkSettings) -> Self {
        Self { request_response: Self::create_reqres_protocol(settings) }
    }

    fn create_reqres_protocol(
        settings: &NetworkSettings,
    ) -> request_response::Behaviour<ReqresCodec> {
        let config = request_response::Config::default()
            .with_request_timeout(settings.request_timeout())
            .with_max_concurrent_streams(settings.max_concurrent_streams);

        // Clients answer requests too, so both directions are always enabled.
        request_response::Behaviour::new(
            [(StreamProtocol::new(REQRES_PROTOCOL), ProtocolSupport::Full)],
            config,
        )
    }
}
