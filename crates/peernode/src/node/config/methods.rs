//! Node configuration methods for peernode.
//!
//! This module defines the configuration methods for peernode nodes,
//! including loading a configuration file from disk.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::debug;

use super::types::{millis, NetworkSettings, NodeConfig, NodeConfigBuilder};
use crate::error::NodeError;

impl NodeConfig {
    /// Configuration with only a passfile; every other option at its default
    pub fn new(passfile_path: impl Into<PathBuf>) -> Self {
        Self {
            passfile_path: passfile_path.into(),
            storage_path: None,
            listeners: Vec::new(),
            bootstrappers: Vec::new(),
            network: NetworkSettings::default(),
        }
    }

    /// Load a configuration file.
    ///
    /// Files ending in `.toml` are parsed as TOML, anything else as JSON.
    /// Relative passfile and storage paths are taken relative to the
    /// directory holding the configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let path = path.as_ref();
        let config_error = |reason: String| NodeError::Config { path: path.to_path_buf(), reason };

        let contents = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let mut config: NodeConfig = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&contents).map_err(|e| config_error(e.to_string()))?,
            _ => serde_json::from_str(&contents).map_err(|e| config_error(e.to_string()))?,
        };

        if let Some(base) = path.parent() {
            config.resolve_relative_paths(base);
        }

        debug!(
            "Loaded configuration from {}: {} listener(s), {} bootstrapper(s)",
            path.display(),
            config.listeners.len(),
            config.bootstrappers.len()
        );
        Ok(config)
    }

    /// Anchor relative passfile and storage paths at `base`
    pub fn resolve_relative_paths(&mut self, base: &Path) {
        if self.passfile_path.is_relative() {
            self.passfile_path = base.join(&self.passfile_path);
        }
        if let Some(storage) = self.storage_path.as_mut() {
            if storage.is_relative() {
                *storage = base.join(&*storage);
            }
        }
    }

    /// Set storage path
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Set listener addresses
    pub fn with_listeners(mut self, listeners: Vec<String>) -> Self {
        self.listeners = listeners;
        self
    }

    /// Set bootstrap peers
    pub fn with_bootstrappers(mut self, bootstrappers: Vec<String>) -> Self {
        self.bootstrappers = bootstrappers;
        self
    }

    pub fn with_network(mut self, network: NetworkSettings) -> Self {
        self.network = network;
        self
    }
}

impl NetworkSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn idle_connection_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_connection_timeout_ms)
    }

    pub fn start_timeout(&self) -> Duration {
        Duration::from_millis(self.start_timeout_ms)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_ms = millis(timeout);
        self
    }

    pub fn with_idle_connection_timeout(mut self, timeout: Duration) -> Self {
        self.idle_connection_timeout_ms = millis(timeout);
        self
    }

    pub fn with_start_timeout(mut self, timeout: Duration) -> Self {
        self.start_timeout_ms = millis(timeout);
        self
    }

    /// Enable or disable dialing bootstrappers at startup
    pub fn with_dial_bootstrappers(mut self, enable: bool) -> Self {
        self.dial_bootstrappers = enable;
        self
    }
}

impl NodeConfigBuilder {
    /// Build the configuration
    pub fn build(self) -> NodeConfig {
        self.config
    }

    pub fn storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.storage_path = Some(path.into());
        self
    }

    /// Add a listener address
    pub fn listener(mut self, addr: impl Into<String>) -> Self {
        self.config.listeners.push(addr.into());
        self
    }

    /// Add bootstrap peer
    pub fn bootstrapper(mut self, addr: impl Into<String>) -> Self {
        self.config.bootstrappers.push(addr.into());
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.network.request_timeout_ms = millis(timeout);
        self
    }

    pub fn start_timeout(mut self, timeout: Duration) -> Self {
        self.config.network.start_timeout_ms = millis(timeout);
        self
    }

    /// Don't dial bootstrappers at startup
    pub fn disable_bootstrap_dial(mut self) -> Self {
        self.config.network.dial_bootstrappers = false;
        self
    }
}
