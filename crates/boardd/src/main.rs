//! boardd — the comment board daemon.
//!
//! Assembles the comment store, the lookup data layer and the HTTP router,
//! then serves until Ctrl-C.
//!
//! # Usage
//!
//! ```text
//! boardd serve --config board.toml --port 8080
//! boardd config --mount /board
//! ```

mod config;

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use board_api::{BoardState, Mount, build_router};
use board_core::CommentStore;

use crate::config::{BoardConfig, Overrides};

const DEFAULT_FILTER: &str = "info,boardd=debug,board_api=debug,board_core=debug";

#[derive(Parser)]
#[command(name = "boardd", about = "Comment board daemon")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the board over HTTP.
    Serve(ConfigArgs),

    /// Print the effective configuration as TOML and exit.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    /// Path to board.toml.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind.
    #[arg(long)]
    bind: Option<IpAddr>,

    /// Port to listen on.
    #[arg(long)]
    port: Option<u16>,

    /// Path prefix for every route ("" serves at the root).
    #[arg(long)]
    mount: Option<String>,
}

impl ConfigArgs {
    fn load(&self) -> anyhow::Result<BoardConfig> {
        let overrides = Overrides {
            bind: self.bind,
            port: self.port,
            mount: self.mount.clone(),
        };
        BoardConfig::load(self.config.as_deref(), &overrides)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if cli.json_logs {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Command::Serve(args) => serve(args.load()?).await,
        Command::Config(args) => {
            print!("{}", args.load()?.to_toml_string()?);
            Ok(())
        }
    }
}

async fn serve(config: BoardConfig) -> anyhow::Result<()> {
    let data = config.data_layer();
    let mount = Mount::new(&config.board.mount);
    let addr = config.socket_addr();

    info!(
        %addr,
        mount = %mount.home(),
        data_layer = data.describe(),
        "comment board starting"
    );

    let state = BoardState::new(Arc::new(CommentStore::new()), data, mount);
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("comment board stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl-C handler, running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
