//! Request handlers for peernode.
//!
//! Inbound requests are dispatched by path to a [`RequestHandler`]. Every
//! registry starts with the `/ping` echo handler.

pub mod ping;
pub mod response;
pub mod validation;

use std::{collections::HashMap, fmt, sync::Arc};

use async_trait::async_trait;
use libp2p::PeerId;

pub use ping::PingHandler;
pub use response::{build_error_response, build_success_response, build_unknown_path_response};
pub use validation::validate_path;

use crate::protocol::{ReqresRequest, ReqresResponse, PING_PATH};

/// Serves requests for one path.
#[async_trait]
pub trait RequestHandler: Send + Sync + 'static {
    /// Produce the response payload for `data` sent by `peer`.
    async fn handle(&self, peer: PeerId, data: Vec<u8>) -> anyhow::Result<Vec<u8>>;
}

/// Handlers keyed by request path
#[derive(Clone)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn RequestHandler>>,
}

impl HandlerRegistry {
    /// A registry serving only `/ping`
    pub fn new() -> Self {
        let mut handlers: HashMap<String, Arc<dyn RequestHandler>> = HashMap::new();
        handlers.insert(PING_PATH.to_string(), Arc::new(PingHandler));
        Self { handlers }
    }

    /// Register `handler` for `path`, replacing any previous handler.
    pub fn register(
        &mut self,
        path: impl Into<String>,
        handler: Arc<dyn RequestHandler>,
    ) -> anyhow::Result<()> {
        let path = path.into();
        validate_path(&path)?;
        self.handlers.insert(path, handler);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<Arc<dyn RequestHandler>> {
        self.handlers.get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.handlers.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Run the handler for `request` and turn the outcome into a response frame.
    pub async fn dispatch(&self, peer: PeerId, request: ReqresRequest) -> ReqresResponse {
        let Some(handler) = self.get(&request.path) else {
            tracing::debug!("No handler for {} requested by {}", request.path, peer);
            return build_unknown_path_response(request.path);
        };

        match handler.handle(peer, request.data).await {
            Ok(data) => build_success_response(data),
            Err(e) => {
                tracing::warn!("Handler for {} failed for {}: {:#}", request.path, peer, e);
                build_error_response(format!("{e:#}"))
            },
        }
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut paths: Vec<_> = self.paths().collect();
        paths.sort_unstable();
        f.debug_struct("HandlerRegistry").field("paths", &paths).finish()
    }
}
