//! Tests for node configuration files

use std::{fs, path::PathBuf, time::Duration};

use peernode::{
    crypto::save_keypair, generate_keypair, NetworkSettings, Node, NodeConfig, NodeError, PeerId,
};

#[test]
fn test_json_config_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.json");
    fs::write(&path, r#"{ "passfile_path": "passfile.json" }"#).unwrap();

    let config = NodeConfig::from_file(&path).unwrap();
    assert_eq!(config.passfile_path, dir.path().join("passfile.json"));
    assert!(config.listeners.is_empty());
    assert!(config.bootstrappers.is_empty());
    assert_eq!(config.storage_path, None);
    assert_eq!(config.network.request_timeout(), Duration::from_secs(30));
    assert!(config.network.dial_bootstrappers);
}

#[test]
fn test_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("node.toml");
    fs::write(
        &path,
        r#"
passfile_path = "/etc/peernode/passfile.json"
storage_path = "data"
listeners = ["/ip4/0.0.0.0/tcp/4001"]
bootstrappers = ["/dns4/boot.example.com/tcp/4001"]

[network]
request_timeout_ms = 1500
dial_bootstrappers = false
"#,
    )
    .unwrap();

    let config = NodeConfig::from_file(&path).unwrap();
    assert_eq!(config.passfile_path, PathBuf::from("/etc/peernode/passfile.json"));
    assert_eq!(config.storage_path, Some(dir.path().join("data")));
    assert_eq!(config.listeners, vec!["/ip4/0.0.0.0/tcp/4001".to_string()]);
    assert_eq!(config.network.request_timeout(), Duration::from_millis(1500));
    assert!(!config.network.dial_bootstrappers);
    // Unset fields keep their defaults
    assert_eq!(config.network.max_concurrent_streams, 64);
}

#[test]
fn test_config_errors_name_the_file() {
    let dir = tempfile::tempdir().unwrap();

    let missing = dir.path().join("missing.json");
    match NodeConfig::from_file(&missing) {
        Err(NodeError::Config { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected config error, got {other:?}"),
    }

    let broken = dir.path().join("broken.json");
    fs::write(&broken, r#"{ "listeners": [] }"#).unwrap();
    assert!(matches!(NodeConfig::from_file(&broken), Err(NodeError::Config { .. })));
}

#[tokio::test]
async fn test_node_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let keypair = generate_keypair();
    save_keypair(&keypair, dir.path().join("passfile.json")).unwrap();

    let path = dir.path().join("node.json");
    fs::write(
        &path,
        r#"{
            "passfile_path": "passfile.json",
            "storage_path": "store",
            "listeners": ["/ip4/127.0.0.1/tcp/0"]
        }"#,
    )
    .unwrap();

    let node = Node::from_config_filepath(&path).await.unwrap();
    assert_eq!(node.peer_id(), keypair.peer_id().unwrap());
    assert_eq!(node.listeners().len(), 1);
    assert_eq!(node.storage_path(), Some(dir.path().join("store").as_path()));
}

#[tokio::test]
async fn test_node_rejects_bad_listener() {
    let dir = tempfile::tempdir().unwrap();
    let passfile = dir.path().join("passfile.json");
    save_keypair(&generate_keypair(), &passfile).unwrap();

    let config = NodeConfig::builder(passfile).listener("127.0.0.1:4001").build();
    let err = Node::from_config(config).await.unwrap_err();
    assert!(matches!(err, NodeError::InvalidAddress { .. }));
}

#[test]
fn test_network_settings_overrides() {
    let defaults = NetworkSettings::default();
    let settings = NetworkSettings::default()
        .with_request_timeout(Duration::from_millis(750))
        .with_idle_connection_timeout(Duration::from_secs(5))
        .with_start_timeout(Duration::from_secs(2))
        .with_dial_bootstrappers(false);

    assert_eq!(settings.request_timeout(), Duration::from_millis(750));
    assert_eq!(settings.idle_connection_timeout(), Duration::from_secs(5));
    assert_eq!(settings.start_timeout(), Duration::from_secs(2));
    assert!(!settings.dial_bootstrappers);
    assert!(defaults.dial_bootstrappers);
    assert_ne!(defaults.request_timeout(), settings.request_timeout());
}

#[tokio::test]
async fn test_node_built_from_config_setters() {
    let dir = tempfile::tempdir().unwrap();
    let passfile = dir.path().join("passfile.json");
    let keypair = generate_keypair();
    save_keypair(&keypair, &passfile).unwrap();
    let me = keypair.peer_id().unwrap();
    let other = PeerId::random();

    let network = NetworkSettings::default()
        .with_request_timeout(Duration::from_secs(4))
        .with_idle_connection_timeout(Duration::from_secs(10))
        .with_start_timeout(Duration::from_secs(3))
        .with_dial_bootstrappers(false);
    let config = NodeConfig::new(&passfile)
        .with_listeners(vec!["/ip4/127.0.0.1/tcp/0".to_string()])
        .with_bootstrappers(vec![
            format!("/ip4/127.0.0.1/tcp/9/p2p/{other}"),
            format!("/ip4/127.0.0.1/tcp/9/p2p/{me}"),
        ])
        .with_network(network.clone());
    assert_eq!(config.listeners.len(), 1);
    assert_eq!(config.bootstrappers.len(), 2);
    assert_eq!(config.network, network);

    let node = Node::from_config(config).await.unwrap();
    assert_eq!(node.settings(), &network);
    assert_eq!(node.listeners().len(), 1);
    assert_eq!(node.bootstrappers().len(), 1);
    assert_eq!(node.bootstrappers()[0].to_string(), format!("/ip4/127.0.0.1/tcp/9/p2p/{other}"));

    node.setup_as_server().await.unwrap();
    assert!(node.listener_address().is_some());
    node.stop().await;
}
