//! Protocol module for peernode.
//!
//! This module contains the request-response frames, the caller-facing
//! [`Response`] and the codec.

pub mod codec;
pub mod types;

pub use codec::{ReqresCodec, MAX_FRAME_SIZE};
pub use types::{ReqresRequest, ReqresResponse, Response, ResponseError};

/// Stream protocol carrying every request-response exchange
pub const REQRES_PROTOCOL: &str = "/peernode/reqres/1.0";

/// Handler path answered by every node with a byte-exact echo
pub const PING_PATH: &str = "/ping";
