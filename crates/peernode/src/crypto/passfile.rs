//! Passfile storage for node key material.
//!
//! A passfile is a small JSON document:
//!
//! ```json
//! { "id": "12D3KooW...", "public_key": "<hex>", "private_key": "<hex>" }
//! ```
//!
//! Only `private_key` is required. `id` and `public_key` are written for
//! humans and checked against the secret on load.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};

use super::keys::{derive_peer_identity, generate_keypair, KeyPair};
use crate::error::IdentityError;

#[derive(Debug, Serialize, Deserialize)]
struct Passfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
    private_key: String,
}

/// Load a keypair from a passfile.
pub fn load_keypair(path: impl AsRef<Path>) -> Result<KeyPair, IdentityError> {
    let path = path.as_ref();
    let raw = fs::read(path)
        .map_err(|e| IdentityError::KeyLoad(format!("cannot read {}: {e}", path.display())))?;
    parse_passfile(&raw)
}

fn parse_passfile(raw: &[u8]) -> Result<KeyPair, IdentityError> {
    let passfile: Passfile = serde_json::from_slice(raw)
        .map_err(|e| IdentityError::KeyLoad(format!("passfile is not valid JSON: {e}")))?;

    let secret = hex::decode(passfile.private_key.trim())
        .map_err(|e| IdentityError::KeyLoad(format!("private_key is not hex: {e}")))?;
    let keypair = KeyPair::from_secret_bytes(&secret)?;

    if let Some(public_key) = &passfile.public_key {
        if !public_key.trim().eq_ignore_ascii_case(&keypair.public_key_hex()) {
            return Err(IdentityError::KeyLoad(
                "public_key does not match private_key".to_string(),
            ));
        }
    }

    if let Some(id) = &passfile.id {
        let derived = derive_peer_identity(&keypair)?;
        if id.trim() != derived.to_string() {
            return Err(IdentityError::KeyLoad(format!(
                "id {id} does not match the key material (derived {derived})"
            )));
        }
    }

    Ok(keypair)
}

/// Save a keypair to a passfile, creating parent directories.
pub fn save_keypair(keypair: &KeyPair, path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    let id = derive_peer_identity(keypair).map_err(io::Error::other)?;

    let passfile = Passfile {
        id: Some(id.to_string()),
        public_key: Some(keypair.public_key_hex()),
        private_key: hex::encode(keypair.secret_key_bytes()),
    };
    let json = serde_json::to_vec_pretty(&passfile).map_err(io::Error::other)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;

    tracing::info!("Saved passfile for {} to: {}", id, path.display());
    Ok(())
}

/// Load an existing passfile from `path`, or generate and save a new one.
pub fn load_or_generate_keypair(path: impl AsRef<Path>) -> Result<KeyPair, IdentityError> {
    let path = path.as_ref();
    if path.exists() {
        tracing::info!("Loading existing passfile from: {}", path.display());
        load_keypair(path)
    } else {
        tracing::info!("Generating new passfile at: {}", path.display());
        let keypair = generate_keypair();
        save_keypair(&keypair, path).map_err(|e| {
            IdentityError::KeyLoad(format!("cannot write {}: {e}", path.display()))
        })?;
        Ok(keypair)
    }
}
