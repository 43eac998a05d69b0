//! Example: two peernode nodes pinging each other in the same process.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use peernode::{
    crypto::save_keypair, generate_keypair, Node, NodeConfig, PeerId, RequestHandler, PING_PATH,
};

/// Replies with the caller's peer id
struct WhoAmI;

#[async_trait]
impl RequestHandler for WhoAmI {
    async fn handle(&self, peer: PeerId, _data: Vec<u8>) -> Result<Vec<u8>> {
        Ok(peer.to_string().into_bytes())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let dir = tempfile::tempdir()?;
    let mut nodes = Vec::new();
    for name in ["server", "client"] {
        let passfile = dir.path().join(format!("{name}.json"));
        save_keypair(&generate_keypair(), &passfile)?;
        let config = NodeConfig::builder(passfile).listener("/ip4/127.0.0.1/tcp/0").build();
        nodes.push(Node::from_config(config).await?);
    }
    let client = nodes.pop().unwrap();
    let mut server = nodes.pop().unwrap();

    server.register_handler("/whoami", Arc::new(WhoAmI))?;
    server.setup_as_server().await?;
    client.setup_as_client().await?;

    let target = server.listener_address().unwrap();
    println!("Server: {target}");
    println!("Client: {}", client.peer_id());

    let pong = client.call(&target, PING_PATH, b"0123456789ABCDEF".to_vec()).await.into_result()?;
    println!("Ping echoed: {}", String::from_utf8_lossy(&pong));

    let seen_as = client.call(&target, "/whoami", Vec::new()).await.into_result()?;
    println!("Server sees us as: {}", String::from_utf8_lossy(&seen_as));

    client.stop().await;
    server.stop().await;
    Ok(())
}
