//! Error types for peernode.
//!
//! Construction and lifecycle failures surface as [`NodeError`]. Failures of a
//! single request are never raised; they travel inside
//! [`Response`](crate::protocol::Response) as a [`CallError`].

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or converting key material.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// The key material could not be read, decoded, or checked.
    #[error("failed to load key material: {0}")]
    KeyLoad(String),

    /// The key material cannot be used by the transport.
    #[error("key material is not usable by the transport: {0}")]
    KeyFormat(String),
}

/// Failures of node construction and lifecycle transitions.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("invalid configuration {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("invalid address '{addr}': {reason}")]
    InvalidAddress { addr: String, reason: String },

    #[error("invalid handler path '{path}': {reason}")]
    InvalidHandlerPath { path: String, reason: String },

    /// The swarm could not be built or a listener could not be bound.
    #[error("failed to start swarm: {0}")]
    SwarmStart(String),

    #[error("node is already running")]
    AlreadyRunning,

    #[error("node is not running")]
    NotRunning,
}

/// Why a single request failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CallError {
    /// The peer could not be dialed, or the connection dropped mid-request.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The peer does not speak the request protocol or has no handler for the path.
    #[error("protocol not supported by peer: {0}")]
    ProtocolUnsupportedByPeer(String),

    #[error("request timed out")]
    Timeout,

    /// The peer answered with bytes that do not decode as a response frame.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The peer's handler ran and reported an error.
    #[error("remote handler failed: {0}")]
    Remote(String),

    /// The target address has no trailing `/p2p/<peer id>`.
    #[error("invalid target address: {0}")]
    InvalidTarget(String),

    #[error("node is not running")]
    NotRunning,
}
