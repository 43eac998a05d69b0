//! `/ping`: answers with the request payload, byte for byte.

use async_trait::async_trait;
use libp2p::PeerId;

use super::RequestHandler;

#[derive(Debug, Clone, Copy, Default)]
pub struct PingHandler;

#[async_trait]
impl RequestHandler for PingHandler {
    async fn handle(&self, peer: PeerId, data: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        tracing::debug!("Ping from {} ({} bytes)", peer, data.len());
        Ok(data)
    }
}
