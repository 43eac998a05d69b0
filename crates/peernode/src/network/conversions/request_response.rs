//! Conversions from request_response events to PeerNodeEvent, and from
//! outbound failures to the error a caller sees.

use std::io;

use libp2p::request_response::{self, OutboundFailure};

use crate::{
    error::CallError,
    network::events::PeerNodeEvent,
    protocol::{ReqresRequest, ReqresResponse, REQRES_PROTOCOL},
};

impl From<request_response::Event<ReqresRequest, ReqresResponse>> for PeerNodeEvent {
    fn from(event: request_response::Event<ReqresRequest, ReqresResponse>) -> Self {
        match event {
            request_response::Event::Message { peer, message, .. } => match message {
                request_response::Message::Request { request_id, request, channel, .. } => {
                    PeerNodeEvent::RequestReceived { peer, request_id, request, channel }
                },
                request_response::Message::Response { request_id, response, .. } => {
                    PeerNodeEvent::ResponseReceived { peer, request_id, response }
                },
            },
            request_response::Event::OutboundFailure { peer, request_id, error, .. } => {
                PeerNodeEvent::OutboundFailure { peer, request_id, error }
            },
            request_response::Event::InboundFailure { peer, request_id, error, .. } => {
                PeerNodeEvent::InboundFailure { peer, request_id, error }
            },
            request_response::Event::ResponseSent { peer, request_id, .. } => {
                PeerNodeEvent::ResponseSent { peer, request_id }
            },
        }
    }
}

impl From<OutboundFailure> for CallError {
    fn from(error: OutboundFailure) -> Self {
        #[allow(unreachable_patterns)]
        match error {
            OutboundFailure::DialFailure => CallError::ConnectionFailed("dial failed".to_string()),
            OutboundFailure::Timeout => CallError::Timeout,
            OutboundFailure::ConnectionClosed => CallError::ConnectionFailed(
                "connection closed before the response arrived".to_string(),
            ),
            OutboundFailure::UnsupportedProtocols => {
                CallError::ProtocolUnsupportedByPeer(REQRES_PROTOCOL.to_string())
            },
            OutboundFailure::Io(e) => match e.kind() {
                io::ErrorKind::InvalidData => CallError::MalformedResponse(e.to_string()),
                io::ErrorKind::UnexpectedEof => CallError::ConnectionFailed(
                    "peer closed the stream without responding".to_string(),
                ),
                _ => CallError::ConnectionFailed(e.to_string()),
            },
            other => CallError::ConnectionFailed(other.to_string()),
        }
    }
}
