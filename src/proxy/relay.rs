//! Upstream fetch for the forwarding relay.
//!
//! # Design Decisions
//! - The translated request carries a fixed header set; the client's own
//!   headers are read but never forwarded
//! - The upstream response is framed by its own Content-length header,
//!   falling back to EOF delimiting when absent; the buffered size is
//!   capped with an explicit error, never padded or silently truncated
//! - The response is fully buffered before any byte reaches the client, so
//!   every upstream failure can still render an error page

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use crate::config::UpstreamConfig;
use crate::http::HttpError;
use crate::net::LineReader;
use crate::proxy::uri::Upstream;

/// Fixed user-agent identification sent with every translated request.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:10.0.3) Gecko/20120305 Firefox/10.0.3";

fn unavailable(upstream: &Upstream, detail: impl std::fmt::Display) -> HttpError {
    HttpError::UpstreamUnavailable(format!("{}:{}: {}", upstream.host, upstream.port, detail))
}

/// Connect to the origin, send the translated request, and return its
/// complete response buffered.
pub async fn fetch(
    upstream: &Upstream,
    config: &UpstreamConfig,
    max_line_bytes: usize,
) -> Result<Vec<u8>, HttpError> {
    let stream = TcpStream::connect((upstream.host.as_str(), upstream.port))
        .await
        .map_err(|e| unavailable(upstream, e))?;
    let (read_half, mut write_half) = stream.into_split();

    let request = format!(
        "GET {} HTTP/1.0\r\n\
         Host: {}:{}\r\n\
         User-Agent: {}\r\n\
         Connection: close\r\n\
         Proxy-Connection: close\r\n\r\n",
        upstream.path, upstream.host, upstream.port, USER_AGENT,
    );
    write_half
        .write_all(request.as_bytes())
        .await
        .map_err(|e| unavailable(upstream, e))?;

    let mut reader = LineReader::new(read_half, max_line_bytes);
    let mut response = Vec::new();
    let mut content_length: Option<usize> = None;

    // Status line and header block, re-framed with CRLF terminators.
    loop {
        let line = reader
            .read_line()
            .await
            .map_err(|e| unavailable(upstream, e))?
            .ok_or_else(|| unavailable(upstream, "connection closed before response head"))?;
        response.extend_from_slice(line.as_bytes());
        response.extend_from_slice(b"\r\n");
        if line.is_empty() {
            break;
        }
        let lower = line.to_ascii_lowercase();
        if let Some(value) = lower.strip_prefix("content-length:") {
            content_length = value.trim().parse().ok();
        }
    }

    let body = match content_length {
        Some(length) if length > config.max_relay_bytes => {
            return Err(unavailable(
                upstream,
                format!(
                    "declared body of {} bytes exceeds the {} byte relay bound",
                    length, config.max_relay_bytes
                ),
            ));
        }
        Some(length) => {
            let mut buf = vec![0u8; length];
            reader
                .read_exact(&mut buf)
                .await
                .map_err(|e| unavailable(upstream, e))?;
            buf
        }
        None => reader
            .read_to_end_capped(config.max_relay_bytes)
            .await
            .map_err(|e| unavailable(upstream, e))?,
    };

    tracing::debug!(
        upstream = %upstream,
        head_and_body_bytes = response.len() + body.len(),
        "Upstream response buffered"
    );

    response.extend_from_slice(&body);
    Ok(response)
}
