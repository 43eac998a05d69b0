//! Tests for node identity derived from the passfile

use std::fs;

use peernode::{
    crypto::{load_keypair, save_keypair},
    derive_peer_identity, export_for_transport, generate_keypair, IdentityError, Node, NodeConfig,
    NodeError, PeerId,
};

#[tokio::test]
async fn test_node_identity_matches_passfile() {
    let dir = tempfile::tempdir().unwrap();
    let passfile = dir.path().join("passfile.json");
    let keypair = generate_keypair();
    save_keypair(&keypair, &passfile).unwrap();

    let first = Node::from_config(NodeConfig::new(&passfile)).await.unwrap();
    let second = Node::from_config(NodeConfig::new(&passfile)).await.unwrap();

    assert_eq!(first.peer_id(), second.peer_id());
    assert_eq!(first.peer_id(), derive_peer_identity(&keypair).unwrap());
}

#[test]
fn test_transport_identity_agrees() {
    let keypair = generate_keypair();
    let exported = export_for_transport(&keypair).unwrap();

    assert_eq!(PeerId::from(exported.public()), derive_peer_identity(&keypair).unwrap());
}

#[test]
fn test_passfile_is_hex_json() {
    let dir = tempfile::tempdir().unwrap();
    let passfile = dir.path().join("passfile.json");
    let keypair = generate_keypair();
    save_keypair(&keypair, &passfile).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&passfile).unwrap()).unwrap();
    assert_eq!(json["public_key"], keypair.public_key_hex());
    assert_eq!(json["id"], keypair.peer_id().unwrap().to_string());
    assert_eq!(json["private_key"].as_str().unwrap().len(), 64);

    let loaded = load_keypair(&passfile).unwrap();
    assert_eq!(loaded.public_key_bytes(), keypair.public_key_bytes());
}

#[tokio::test]
async fn test_missing_passfile_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    let config = NodeConfig::new(dir.path().join("nope.json"));

    let err = Node::from_config(config).await.unwrap_err();
    assert!(matches!(err, NodeError::Identity(IdentityError::KeyLoad(_))));
    assert!(!dir.path().join("nope.json").exists());
}
