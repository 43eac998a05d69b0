//! Tests for routing requests to handlers

use std::sync::Arc;

use async_trait::async_trait;
use peernode::{
    protocol::{ReqresRequest, ResponseError},
    HandlerRegistry, PeerId, RequestHandler, PING_PATH,
};

struct Length;

#[async_trait]
impl RequestHandler for Length {
    async fn handle(&self, _peer: PeerId, data: Vec<u8>) -> anyhow::Result<Vec<u8>> {
        Ok((data.len() as u32).to_be_bytes().to_vec())
    }
}

#[tokio::test]
async fn test_ping_echoes_payload() {
    let registry = HandlerRegistry::new();
    let request = ReqresRequest { path: PING_PATH.to_string(), data: b"0123456789ABCDEF".to_vec() };

    let frame = registry.dispatch(PeerId::random(), request).await;
    assert!(frame.ok);
    assert_eq!(frame.data, b"0123456789ABCDEF".to_vec());
}

#[tokio::test]
async fn test_registered_handler_is_routed() {
    let mut registry = HandlerRegistry::new();
    registry.register("/len", Arc::new(Length)).unwrap();

    let request = ReqresRequest { path: "/len".to_string(), data: vec![0; 300] };
    let frame = registry.dispatch(PeerId::random(), request).await;
    assert_eq!(frame.data, 300u32.to_be_bytes().to_vec());

    let request = ReqresRequest { path: "/length".to_string(), data: Vec::new() };
    let frame = registry.dispatch(PeerId::random(), request).await;
    assert!(!frame.ok);
    assert_eq!(frame.error, Some(ResponseError::UnknownPath("/length".to_string())));
}

#[test]
fn test_register_replaces_ping() {
    let mut registry = HandlerRegistry::new();
    registry.register(PING_PATH, Arc::new(Length)).unwrap();

    let mut paths: Vec<_> = registry.paths().collect();
    paths.sort_unstable();
    assert_eq!(paths, vec![PING_PATH]);
}
