//! peernode - a libp2p node with an Ed25519 identity and path-routed
//! request/response calls.
//!
//! A [`Node`] is created from a [`NodeConfig`], started as a client or a
//! server with [`Node::setup`], and talks to other nodes with [`Node::call`].

pub mod crypto;
pub mod discovery;
pub mod error;
pub mod handlers;
pub mod network;
pub mod node;
pub mod protocol;
pub mod transport;

// Re-export main types
pub use crypto::{derive_peer_identity, export_for_transport, generate_keypair, KeyPair};
pub use discovery::AddressResolver;
pub use error::{CallError, IdentityError, NodeError};
pub use handlers::{HandlerRegistry, RequestHandler};
pub use libp2p::{Multiaddr, PeerId};
pub use node::{Mode, NetworkSettings, Node, NodeConfig, NodeState};
pub use protocol::{Response, PING_PATH, REQRES_PROTOCOL};

/// Handlers report failures with anyhow
pub use anyhow;
