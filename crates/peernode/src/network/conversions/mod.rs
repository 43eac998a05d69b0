//! Event conversions for peernode network events.
//!
//! This module implements conversions from libp2p events to PeerNodeEvent.

pub mod request_response;
