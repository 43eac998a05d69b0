//! Construction and handler registration for Node.

use std::{path::Path, sync::Arc};

use tracing::{debug, info};

use super::peer_node::Node;
use crate::{
    crypto::{derive_peer_identity, load_keypair},
    discovery::AddressResolver,
    error::NodeError,
    handlers::RequestHandler,
    network::parse_multiaddr,
    node::config::NodeConfig,
};

impl Node {
    /// Create a node from `config`, resolving bootstrappers with system DNS.
    ///
    /// The passfile must already exist; no key material is generated here.
    pub async fn from_config(config: NodeConfig) -> Result<Self, NodeError> {
        Self::from_config_with_resolver(config, &AddressResolver::system()).await
    }

    /// Load a configuration file and create a node from it
    pub async fn from_config_filepath(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let config = NodeConfig::from_file(path)?;
        Self::from_config(config).await
    }

    /// Create a node from `config`, resolving bootstrappers with `resolver`
    pub async fn from_config_with_resolver(
        config: NodeConfig,
        resolver: &AddressResolver,
    ) -> Result<Self, NodeError> {
        let keypair = load_keypair(&config.passfile_path)?;
        let peer_id = derive_peer_identity(&keypair)?;
        info!("Local peer id: {}", peer_id);

        let listeners = config
            .listeners
            .iter()
            .map(|raw| parse_multiaddr(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let bootstrappers = resolver.resolve_bootstrap_list(&config.bootstrappers, &peer_id).await;

        Ok(Node::new_internal(
            keypair,
            peer_id,
            config.storage_path,
            listeners,
            bootstrappers,
            config.network,
        ))
    }

    /// Serve `path` with `handler` on the swarm started by the next `setup`.
    ///
    /// A swarm that is already running keeps the handlers it started with.
    pub fn register_handler(
        &mut self,
        path: impl Into<String>,
        handler: Arc<dyn RequestHandler>,
    ) -> Result<(), NodeError> {
        let path = path.into();
        self.handlers.register(path.clone(), handler).map_err(|e| {
            NodeError::InvalidHandlerPath { path: path.clone(), reason: e.to_string() }
        })?;
        debug!("Registered handler for {}", path);
        Ok(())
    }
}
