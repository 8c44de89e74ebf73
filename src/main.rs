//! webserv: iterative HTTP/1.0 origin server.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                ORIGIN SERVER                  │
//!                    │                                               │
//!   Client Request   │  ┌─────────┐   ┌─────────┐   ┌────────────┐  │
//!   ─────────────────┼─▶│   net   │──▶│  http   │──▶│   serve    │  │
//!                    │  │listener │   │ request │   │  dispatch  │  │
//!                    │  └─────────┘   └─────────┘   └─────┬──────┘  │
//!                    │                                     │         │
//!                    │                     ┌───────────────┴──────┐  │
//!   Client Response  │                     ▼                      ▼  │
//!   ◀────────────────┼──────────── static file           subprocess  │
//!                    │             (streamed)          (stdout owns  │
//!                    │                                 the response) │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! One connection is accepted, served to completion, and closed before the
//! next accept. Dynamic targets (URIs containing `cgi-bin`) run the resolved
//! executable with the query string in `QUERY_STRING`.

use std::path::PathBuf;

use clap::Parser;

use webserv::config::{load_config, ServerConfig};
use webserv::net::Listener;
use webserv::observability::init_logging;
use webserv::OriginServer;

#[derive(Parser)]
#[command(name = "webserv")]
#[command(about = "Iterative HTTP/1.0 origin server", long_about = None)]
struct Cli {
    /// Port to listen on.
    port: u16,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resource root override (defaults to the current directory).
    #[arg(long)]
    root: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    config.override_port(cli.port);
    if let Some(root) = cli.root {
        config.resources.root = root;
    }

    init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        root = %config.resources.root,
        default_document = %config.resources.default_document,
        "webserv starting"
    );

    let listener = Listener::bind(&config.listener).await?;
    OriginServer::new(config).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
