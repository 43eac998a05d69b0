//! Ed25519 key material and the peer identity derived from it.
//!
//! The node keeps its own [`KeyPair`] and hands the transport a libp2p
//! keypair built from the same secret via [`export_for_transport`].

use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey};
use libp2p::{identity, PeerId};
use rand::rngs::OsRng;

use crate::error::IdentityError;

/// Ed25519 signing key and its verifying key.
#[derive(Clone)]
pub struct KeyPair {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl KeyPair {
    pub fn new(signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self { signing_key, verifying_key }
    }

    /// Build a keypair from a raw 32-byte Ed25519 secret.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        let secret: [u8; 32] = bytes.try_into().map_err(|_| {
            IdentityError::KeyLoad(format!("expected 32 secret key bytes, got {}", bytes.len()))
        })?;
        Ok(Self::new(SigningKey::from_bytes(&secret)))
    }

    /// Get the Ed25519 public key as bytes.
    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    /// Get the Ed25519 public key as hex string.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }

    pub(crate) fn secret_key_bytes(&self) -> [u8; 32] {
        self.signing_key.to_bytes()
    }

    /// Shorthand for [`derive_peer_identity`].
    pub fn peer_id(&self) -> Result<PeerId, IdentityError> {
        derive_peer_identity(self)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair").field("public_key", &self.public_key_hex()).finish_non_exhaustive()
    }
}

/// Generate a new random Ed25519 keypair.
pub fn generate_keypair() -> KeyPair {
    let mut csprng = OsRng;
    let mut secret_bytes = [0u8; 32];
    rand::RngCore::fill_bytes(&mut csprng, &mut secret_bytes);
    KeyPair::new(SigningKey::from_bytes(&secret_bytes))
}

fn transport_public_key(keypair: &KeyPair) -> Result<identity::PublicKey, IdentityError> {
    let public = identity::ed25519::PublicKey::try_from_bytes(&keypair.public_key_bytes())
        .map_err(|e| IdentityError::KeyLoad(format!("invalid ed25519 public key: {e}")))?;
    Ok(identity::PublicKey::from(public))
}

/// Derive the network identity of `keypair`.
///
/// Depends on the public key only, so two keypairs sharing a public key
/// always yield the same [`PeerId`].
pub fn derive_peer_identity(keypair: &KeyPair) -> Result<PeerId, IdentityError> {
    Ok(transport_public_key(keypair)?.to_peer_id())
}

/// Convert `keypair` into the libp2p keypair the transport authenticates with.
pub fn export_for_transport(keypair: &KeyPair) -> Result<identity::Keypair, IdentityError> {
    let exported = identity::Keypair::ed25519_from_bytes(keypair.secret_key_bytes())
        .map_err(|e| IdentityError::KeyFormat(e.to_string()))?;

    if exported.public() != transport_public_key(keypair)? {
        return Err(IdentityError::KeyFormat(
            "exported public key does not match the stored public key".to_string(),
        ));
    }

    Ok(exported)
}
