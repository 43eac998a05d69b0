//! Starting and stopping the swarm.

use std::sync::Arc;

use libp2p::Multiaddr;
use tracing::{info, warn};

use super::{
    peer_node::{Lifecycle, Node, RunningSwarm},
    run::SwarmDriver,
};
use crate::{crypto::export_for_transport, error::NodeError, node::mode::Mode, transport};

impl Node {
    /// Build the swarm and start it in `mode`.
    ///
    /// Server mode binds every configured listener and only returns once all
    /// of them are bound. Resolved bootstrappers are dialed afterwards.
    /// On error nothing is left running and the node keeps its prior state.
    pub async fn setup(&self, mode: Mode) -> Result<(), NodeError> {
        let _transition = self.transition.lock().await;
        if self.is_running() {
            return Err(NodeError::AlreadyRunning);
        }

        let listeners: &[Multiaddr] = if mode.binds_listeners() { self.listeners.as_slice() } else { &[] };
        info!(
            "Starting {} as {} with {} listener(s) and {} bootstrapper(s)",
            self.peer_id,
            mode,
            listeners.len(),
            self.bootstrappers.len()
        );

        let keypair = export_for_transport(&self.keypair)?;
        let swarm = transport::build_swarm(keypair, &self.settings)?;
        let (mut driver, handle) = SwarmDriver::new(swarm, Arc::new(self.handlers.clone()));

        if let Err(e) = driver.start_listening(listeners, self.settings.start_timeout()).await {
            warn!("Failed to start {}: {}", self.peer_id, e);
            return Err(e);
        }
        if self.settings.dial_bootstrappers {
            driver.dial_bootstrappers(&self.bootstrappers);
        }

        let bound = handle.listen_addrs();
        let task = tokio::spawn(driver.run());
        *self.lifecycle.write() = Lifecycle::Running(RunningSwarm { mode, handle, task });

        info!("Node {} running as {} on {:?}", self.peer_id, mode, bound);
        Ok(())
    }

    pub async fn setup_as_client(&self) -> Result<(), NodeError> {
        self.setup(Mode::Client).await
    }

    pub async fn setup_as_server(&self) -> Result<(), NodeError> {
        self.setup(Mode::Server).await
    }

    /// Stop the swarm and release its listeners.
    ///
    /// Outstanding calls fail with a connection error. Stopping a node that
    /// is not running does nothing.
    pub async fn stop(&self) {
        let _transition = self.transition.lock().await;

        let running = {
            let mut lifecycle = self.lifecycle.write();
            match std::mem::replace(&mut *lifecycle, Lifecycle::Stopped) {
                Lifecycle::Running(running) => running,
                previous => {
                    *lifecycle = previous;
                    return;
                },
            }
        };

        let RunningSwarm { mode, handle, task } = running;
        handle.shutdown().await;
        if let Err(e) = task.await {
            warn!("Swarm task for {} ended abnormally: {}", self.peer_id, e);
        }
        info!("Node {} ({}) stopped", self.peer_id, mode);
    }
}
