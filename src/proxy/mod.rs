//! Forwarding relay subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted client connection
//!     → http::request (request line; headers read and discarded)
//!     → uri.rs (absolute-form URI → host, port, path)
//!     → relay.rs (second connection to the origin, translated request,
//!                 framed response buffered)
//!     → buffer written to the client verbatim, both connections closed
//! ```
//!
//! # Design Decisions
//! - One relay at a time, handled to completion; no timeouts, so a hung
//!   origin stalls the process
//! - Connect and mid-relay failures surface to the client as a 502 page

pub mod relay;
pub mod uri;

pub use relay::{fetch, USER_AGENT};
pub use uri::{parse_upstream, Upstream};

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::http::{read_request, write_error_page, TransactionError};
use crate::net::{ConnectionId, LineReader, Listener, ListenerError};

/// Iterative HTTP/1.0 forwarding relay.
pub struct RelayServer {
    config: ServerConfig,
}

impl RelayServer {
    /// Create a relay over a validated configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Accept and relay connections until interrupted.
    pub async fn run(&self, listener: Listener) -> Result<(), ListenerError> {
        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = accepted?;
                    let id = ConnectionId::new();
                    tracing::info!(connection_id = %id, peer_addr = %peer, "Accepted connection");
                    self.handle(stream, id).await;
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Relay one transaction to completion and close the connection.
    async fn handle(&self, stream: TcpStream, id: ConnectionId) {
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = LineReader::new(read_half, self.config.limits.max_line_bytes);

        let outcome: Result<(), TransactionError> = async {
            let request = read_request(&mut reader).await?;
            let upstream = parse_upstream(&request.target, self.config.upstream.default_port)?;

            tracing::info!(connection_id = %id, upstream = %upstream, "Relaying request");

            let response = fetch(
                &upstream,
                &self.config.upstream,
                self.config.limits.max_line_bytes,
            )
            .await?;
            write_half.write_all(&response).await?;
            Ok(())
        }
        .await;

        match outcome {
            Ok(()) => {}
            Err(TransactionError::Http(err)) => {
                tracing::warn!(
                    connection_id = %id,
                    status = err.status(),
                    cause = %err.cause(),
                    "Relay rejected"
                );
                if let Err(io_err) = write_error_page(&mut write_half, &err).await {
                    tracing::warn!(connection_id = %id, error = %io_err, "Error page not delivered");
                }
            }
            Err(TransactionError::Io(err)) => {
                tracing::warn!(connection_id = %id, error = %err, "Connection failed mid-relay");
            }
        }

        let _ = write_half.shutdown().await;
    }
}
