//! Origin server subsystem.
//!
//! # Data Flow
//! ```text
//! Accepted connection
//!     → http::request (request line + header block)
//!     → dispatch.rs (method guard, URI classification, metadata probe)
//!     → static_files.rs | dynamic.rs
//!     → response written to client, connection closed
//! ```
//!
//! # Design Decisions
//! - Strictly iterative: one transaction at a time, handled to completion
//!   before the next accept; no shared state between transactions
//! - No timeouts: a hung dynamic program stalls the process

pub mod dispatch;
pub mod dynamic;
pub mod static_files;

pub use dispatch::{dispatch, ResourceMetadata};
pub use dynamic::CgiCommand;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::http::{read_request, write_error_page, TransactionError};
use crate::net::{ConnectionId, LineReader, Listener, ListenerError};

/// Iterative HTTP/1.0 origin server.
pub struct OriginServer {
    config: ServerConfig,
}

impl OriginServer {
    /// Create a server over a validated configuration.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Accept and serve connections until interrupted.
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

    /// Run one transaction to completion and close the connection.
    async fn handle(&self, stream: TcpStream, id: ConnectionId) {
        let (read_half, mut write_half) = stream.into_split();
        let mut reader = LineReader::new(read_half, self.config.limits.max_line_bytes);

        let outcome: Result<(), TransactionError> = async {
            let request = read_request(&mut reader).await?;
            dispatch(&request, &mut write_half, &self.config).await
        }
        .await;

        match outcome {
            Ok(()) => {}
            Err(TransactionError::Http(err)) => {
                tracing::warn!(
                    connection_id = %id,
                    status = err.status(),
                    cause = %err.cause(),
                    "Transaction rejected"
                );
                if let Err(io_err) = write_error_page(&mut write_half, &err).await {
                    tracing::warn!(connection_id = %id, error = %io_err, "Error page not delivered");
                }
            }
            Err(TransactionError::Io(err)) => {
                tracing::warn!(connection_id = %id, error = %err, "Connection failed mid-response");
            }
        }

        let _ = write_half.shutdown().await;
    }
}
