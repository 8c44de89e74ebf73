//! Dynamic content via subprocess execution.
//!
//! # Responsibilities
//! - Send the two-line partial response (the program owns the rest,
//!   including its own header block)
//! - Spawn the resolved executable with the query string in its environment
//! - Stream the program's stdout onto the client connection
//! - Await program exit before the transaction completes
//!
//! # Design Decisions
//! - Environment is an explicit per-spawn key/value set, never a
//!   process-wide mutation; each child gets its own copy
//! - Exit status is logged, not inspected: a crashing program yields a
//!   truncated body and nothing more

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::process::Command;

use crate::http::{PROTOCOL, SERVER_NAME};

/// Environment variable carrying the query string to the program.
pub const QUERY_ENV: &str = "QUERY_STRING";

/// One subprocess invocation: a program, an explicit environment, and a
/// stdout target supplied at run time.
#[derive(Debug)]
pub struct CgiCommand {
    program: PathBuf,
    env: Vec<(String, String)>,
}

impl CgiCommand {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            env: Vec::new(),
        }
    }

    /// Add one environment variable for the spawned program.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Spawn the program with no arguments, stream its stdout into
    /// `writer` until EOF, then reap it and return its exit status.
    pub async fn run_onto<W>(self, writer: &mut W) -> std::io::Result<ExitStatus>
    where
        W: AsyncWrite + Unpin,
    {
        let mut child = Command::new(&self.program)
            .envs(self.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .spawn()?;

        let mut stdout = child.stdout.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "child stdout was not captured")
        })?;

        tokio::io::copy(&mut stdout, writer).await?;
        child.wait().await
    }
}

/// Serve a dynamic target: partial response head, then the program's output.
pub async fn serve_dynamic<W>(writer: &mut W, path: &Path, query: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    // Status line and server identification only; no Content-length, no
    // Content-type, no terminating blank line. The program emits the rest
    // of the response.
    let head = format!("{} 200 OK\r\nServer: {}\r\n", PROTOCOL, SERVER_NAME);
    writer.write_all(head.as_bytes()).await?;

    let status = CgiCommand::new(path)
        .env(QUERY_ENV, query)
        .run_onto(writer)
        .await?;

    tracing::debug!(path = %path.display(), status = %status, "Dynamic handler exited");
    Ok(())
}
