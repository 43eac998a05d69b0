//! Key material for peernode.
//!
//! - Ed25519 key generation and passfile storage
//! - Peer identity derivation
//! - Conversion into the keypair the libp2p transport authenticates with

pub mod keys;
pub mod passfile;

pub use keys::{derive_peer_identity, export_for_transport, generate_keypair, KeyPair};
pub use passfile::{load_keypair, load_or_generate_keypair, save_keypair};
