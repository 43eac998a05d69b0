//! Outstanding outbound requests of a running swarm.
//!
//! Each entry pairs the libp2p request id with the channel its caller is
//! waiting on.

use std::collections::HashMap;

use libp2p::{request_response::OutboundRequestId, PeerId};
use tokio::sync::oneshot;

use crate::protocol::Response;

struct PendingCall {
    peer: PeerId,
    reply: oneshot::Sender<Response>,
}

/// Calls awaiting a response, keyed by request id
#[derive(Default)]
pub struct PendingCalls {
    pending: HashMap<OutboundRequestId, PendingCall>,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a request that was just handed to the behaviour
    pub fn insert(
        &mut self,
        request_id: OutboundRequestId,
        peer: PeerId,
        reply: oneshot::Sender<Response>,
    ) {
        self.pending.insert(request_id, PendingCall { peer, reply });
    }

    /// Deliver the outcome of `request_id` to its caller.
    ///
    /// Returns `false` if the request is unknown. A caller that already gave
    /// up simply never sees the response.
    pub fn complete(&mut self, request_id: OutboundRequestId, response: Response) -> bool {
        let Some(call) = self.pending.remove(&request_id) else {
            return false;
        };

        if call.reply.send(response).is_err() {
            tracing::debug!(
                "Discarding response from {} for request {}: caller went away",
                call.peer,
                request_id
            );
        }
        true
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Fail every outstanding call, e.g. on shutdown
    pub fn fail_all(&mut self, response: Response) {
        for (_, call) in self.pending.drain() {
            let _ = call.reply.send(response.clone());
        }
    }
}
