//! Static content transfer.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::{PROTOCOL, SERVER_NAME};
use crate::serve::dispatch::ResourceMetadata;

/// Fixed suffix → content-type table. Unknown suffixes are plain text.
const CONTENT_TYPES: [(&str, &str); 5] = [
    ("html", "text/html"),
    ("gif", "image/gif"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("mp4", "video/mp4"),
];

/// Derive the content type from the file name suffix.
pub fn content_type(path: &Path) -> &'static str {
    let suffix = path.extension().and_then(|ext| ext.to_str());
    CONTENT_TYPES
        .iter()
        .find(|(known, _)| Some(*known) == suffix)
        .map(|(_, content_type)| *content_type)
        .unwrap_or("text/plain")
}

/// Stream a validated file as a complete 200 response.
///
/// `Content-length` is the exact file size and exactly that many body bytes
/// follow the head (none for HEAD). The file handle lives only for the copy.
pub async fn serve_file<W>(
    writer: &mut W,
    path: &Path,
    meta: &ResourceMetadata,
    head_only: bool,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut file = File::open(path).await?;

    let head = format!(
        "{} 200 OK\r\nServer: {}\r\nConnection: close\r\nContent-length: {}\r\nContent-type: {}\r\n\r\n",
        PROTOCOL,
        SERVER_NAME,
        meta.len,
        content_type(path),
    );
    writer.write_all(head.as_bytes()).await?;

    if !head_only {
        let copied = tokio::io::copy(&mut file, writer).await?;
        tracing::debug!(path = %path.display(), bytes = copied, "Static body sent");
    }

    Ok(())
}
