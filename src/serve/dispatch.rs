//! Content-dispatch decision for one origin transaction.
//!
//! # Responsibilities
//! - Guard the method before any filesystem access
//! - Resolve the target and probe its metadata exactly once
//! - Enforce existence and permission invariants
//! - Route to the static or dynamic server
//!
//! # Design Decisions
//! - Permission checks read owner mode bits from the single metadata probe;
//!   a forbidden file is never opened
//! - Every error path terminates the transaction before any content byte

use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::config::ServerConfig;
use crate::http::{parse_target, HttpError, Request, Target, TransactionError};
use crate::serve::dynamic::serve_dynamic;
use crate::serve::static_files::serve_file;

/// Filesystem facts about a resolved target, probed once per request and
/// never cached.
#[derive(Debug, Clone, Copy)]
pub struct ResourceMetadata {
    pub is_regular: bool,
    pub len: u64,
    /// Owner read bit (S_IRUSR).
    pub readable: bool,
    /// Owner execute bit (S_IXUSR).
    pub executable: bool,
}

impl ResourceMetadata {
    /// Probe a path. `None` when it does not resolve to anything.
    pub async fn probe(path: &Path) -> Option<Self> {
        let meta = tokio::fs::metadata(path).await.ok()?;
        let mode = meta.permissions().mode();
        Some(Self {
            is_regular: meta.is_file(),
            len: meta.len(),
            readable: mode & 0o400 != 0,
            executable: mode & 0o100 != 0,
        })
    }
}

/// Run one origin transaction: guard, resolve, probe, dispatch.
pub async fn dispatch<W>(
    request: &Request,
    writer: &mut W,
    config: &ServerConfig,
) -> Result<(), TransactionError>
where
    W: AsyncWrite + Unpin,
{
    if !request.is_supported_method() {
        return Err(HttpError::UnsupportedMethod(request.method.clone()).into());
    }

    let target = parse_target(&request.target, &config.resources);
    let shown_path = target.path().display().to_string();

    let meta = ResourceMetadata::probe(target.path())
        .await
        .ok_or_else(|| HttpError::NotFound(shown_path.clone()))?;

    match &target {
        Target::Static { path } => {
            if !meta.is_regular || !meta.readable {
                return Err(HttpError::Forbidden(shown_path).into());
            }
            tracing::info!(path = %path.display(), size = meta.len, "Serving static content");
            serve_file(writer, path, &meta, request.is_head()).await?;
        }
        Target::Dynamic { path, query } => {
            if !meta.is_regular || !meta.executable {
                return Err(HttpError::Forbidden(shown_path).into());
            }
            tracing::info!(path = %path.display(), query = %query, "Serving dynamic content");
            serve_dynamic(writer, path, query).await?;
        }
    }

    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::Permissions;

    #[tokio::test]
    async fn probe_missing_path_is_none() {
        assert!(ResourceMetadata::probe(Path::new("/no/such/path"))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn probe_reads_mode_bits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, b"hello").unwrap();
        std::fs::set_permissions(&path, Permissions::from_mode(0o644)).unwrap();

        let meta = ResourceMetadata::probe(&path).await.unwrap();
        assert!(meta.is_regular);
        assert!(meta.readable);
        assert!(!meta.executable);
        assert_eq!(meta.len, 5);

        std::fs::set_permissions(&path, Permissions::from_mode(0o100)).unwrap();
        let meta = ResourceMetadata::probe(&path).await.unwrap();
        assert!(!meta.readable);
        assert!(meta.executable);
    }

    #[tokio::test]
    async fn probe_directory_is_not_regular() {
        let dir = tempfile::tempdir().unwrap();
        let meta = ResourceMetadata::probe(dir.path()).await.unwrap();
        assert!(!meta.is_regular);
    }
}
