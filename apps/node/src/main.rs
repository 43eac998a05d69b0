//! peernode: run a node, create a passfile, or ping a peer.

use std::{path::PathBuf, time::{Duration, Instant}};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use peernode::{
    Mode, Multiaddr, Node, PING_PATH,
    crypto::{generate_keypair, save_keypair},
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "peernode", version)]
#[command(about = "Peer-to-peer node with request/response calls")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start a node and keep it running until Ctrl+C
    Run {
        /// Node configuration file (.json or .toml)
        #[arg(short, long)]
        config: PathBuf,

        /// client or server
        #[arg(short, long, default_value = "server")]
        mode: Mode,
    },

    /// Write a fresh passfile
    Keygen {
        path: PathBuf,

        /// Overwrite an existing passfile
        #[arg(long)]
        force: bool,
    },

    /// Start as a client, ping one peer and exit
    Ping {
        #[arg(short, long)]
        config: PathBuf,

        /// Peer address ending in /p2p/<peer id>
        target: Multiaddr,

        #[arg(long, default_value = "0123456789ABCDEF")]
        payload: String,

        /// Overrides the configured request timeout
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { config, mode } => run(config, mode).await,
        Command::Keygen { path, force } => keygen(path, force),
        Command::Ping { config, target, payload, timeout_ms } => {
            ping(config, target, payload, timeout_ms).await
        },
    }
}

async fn run(config: PathBuf, mode: Mode) -> anyhow::Result<()> {
    let node = Node::from_config_filepath(&config)
        .await
        .with_context(|| format!("cannot create node from {}", config.display()))?;
    node.setup(mode).await?;

    for addr in node.listener_addresses() {
        println!("{addr}");
    }
    info!("Node {} running as {}, press Ctrl+C to stop", node.peer_id(), mode);

    tokio::signal::ctrl_c().await.context("cannot listen for Ctrl+C")?;
    info!("Ctrl+C received, shutting down");
    node.stop().await;
    Ok(())
}

fn keygen(path: PathBuf, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("{} already exists, pass --force to overwrite it", path.display());
    }

    let keypair = generate_keypair();
    save_keypair(&keypair, &path)
        .with_context(|| format!("cannot write passfile {}", path.display()))?;
    println!("{}", keypair.peer_id()?);
    Ok(())
}

async fn ping(
    config: PathBuf,
    target: Multiaddr,
    payload: String,
    timeout_ms: Option<u64>,
) -> anyhow::Result<()> {
    let node = Node::from_config_filepath(&config)
        .await
        .with_context(|| format!("cannot create node from {}", config.display()))?;
    node.setup_as_client().await?;

    let timeout = timeout_ms.map(Duration::from_millis).unwrap_or(node.settings().request_timeout());
    let started = Instant::now();
    let response = node.call_with_timeout(&target, PING_PATH, payload.clone(), timeout).await;
    let elapsed = started.elapsed();
    node.stop().await;

    let echoed = response.into_result()?;
    if echoed != payload.as_bytes() {
        bail!("{target} echoed {} bytes that differ from the payload", echoed.len());
    }
    println!("pong from {target} in {elapsed:?}");
    Ok(())
}
