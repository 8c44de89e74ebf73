//! webrelay: forwarding HTTP/1.0 relay.
//!
//! Accepts one client at a time, parses the absolute-form request URI, opens
//! a second connection to the named origin, and relays the origin's framed
//! response back verbatim.

use std::path::PathBuf;

use clap::Parser;

use webserv::config::{load_config, ServerConfig};
use webserv::net::Listener;
use webserv::observability::init_logging;
use webserv::RelayServer;

#[derive(Parser)]
#[command(name = "webrelay")]
#[command(about = "Forwarding HTTP/1.0 relay", long_about = None)]
struct Cli {
    /// Port to listen on.
    port: u16,

    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    config.override_port(cli.port);

    init_logging(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        default_port = config.upstream.default_port,
        max_relay_bytes = config.upstream.max_relay_bytes,
        "webrelay starting"
    );

    let listener = Listener::bind(&config.listener).await?;
    RelayServer::new(config).run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
