//! Operating modes and lifecycle states of a node.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a node participates in the network.
///
/// A client only dials out. A server also binds its configured listeners
/// and answers inbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Client,
    Server,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Client => "client",
            Mode::Server => "server",
        }
    }

    /// Whether this mode binds the configured listeners
    pub fn binds_listeners(self) -> bool {
        matches!(self, Mode::Server)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}', expected 'client' or 'server'")]
pub struct ParseModeError(String);

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Mode::Client),
            "server" => Ok(Mode::Server),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}

/// Observable lifecycle state of a [`Node`](crate::Node)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Constructed,
    Running(Mode),
    Stopped,
}
