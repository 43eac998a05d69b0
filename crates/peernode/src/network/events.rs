//! Network events for peernode.
//!
//! This module defines the events emitted by the peernode network behaviour.

use libp2p::{
    request_response::{self, InboundRequestId, OutboundRequestId},
    PeerId,
};

use crate::protocol::{ReqresRequest, ReqresResponse};

/// Events emitted by the PeerNodeBehaviour
#[derive(Debug)]
pub enum PeerNodeEvent {
    /// A peer sent us a request
    RequestReceived {
        peer: PeerId,
        request_id: InboundRequestId,
        request: ReqresRequest,
        channel: request_response::ResponseChannel<ReqresResponse>,
    },
    /// A response to one of our requests arrived
    ResponseReceived {
        peer: PeerId,
        request_id: OutboundRequestId,
        response: ReqresResponse,
    },
    /// One of our requests failed
    OutboundFailure {
        peer: PeerId,
        request_id: OutboundRequestId,
        error: request_response::OutboundFailure,
    },
    /// Answering a peer's request failed
    InboundFailure {
        peer: PeerId,
        request_id: InboundRequestId,
        error: request_response::InboundFailure,
    },
    /// Our response to a peer's request was written
    ResponseSent { peer: PeerId, request_id: InboundRequestId },
}
