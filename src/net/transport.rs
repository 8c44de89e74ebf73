//! Buffered line transport over a connected socket.
//!
//! # Responsibilities
//! - Read one line up to the `\n` terminator
//! - Read exactly N bytes
//! - Read to EOF under an explicit byte cap
//!
//! # Design Decisions
//! - Growable line buffer with an explicit length bound; overlong input is
//!   a signaled error, never silent truncation
//! - Terminators are trimmed (`\r\n` or bare `\n`); EOF at a line start is
//!   a clean end-of-stream, EOF mid-line yields the partial line

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};

/// Error type for transport reads.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line exceeds {0} bytes")]
    LineTooLong(usize),

    #[error("payload exceeds {0} bytes")]
    PayloadTooLarge(usize),

    #[error("connection closed mid-read")]
    UnexpectedEof,
}

/// Buffered reader exposing line-oriented and exact-length reads.
pub struct LineReader<R> {
    inner: BufReader<R>,
    max_line_bytes: usize,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(inner: R, max_line_bytes: usize) -> Self {
        Self {
            inner: BufReader::new(inner),
            max_line_bytes,
        }
    }

    /// Read one line, terminator trimmed. Returns `None` on a clean EOF
    /// before any byte of a new line.
    pub async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut line: Vec<u8> = Vec::new();

        loop {
            let (consumed, at_end) = {
                let available = self.inner.fill_buf().await?;
                if available.is_empty() {
                    if line.is_empty() {
                        return Ok(None);
                    }
                    (0, true)
                } else if let Some(pos) = available.iter().position(|&b| b == b'\n') {
                    if line.len() + pos + 1 > self.max_line_bytes {
                        return Err(TransportError::LineTooLong(self.max_line_bytes));
                    }
                    line.extend_from_slice(&available[..=pos]);
                    (pos + 1, true)
                } else {
                    if line.len() + available.len() > self.max_line_bytes {
                        return Err(TransportError::LineTooLong(self.max_line_bytes));
                    }
                    line.extend_from_slice(available);
                    (available.len(), false)
                }
            };
            self.inner.consume(consumed);
            if at_end {
                break;
            }
        }

        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Read exactly `buf.len()` bytes.
    pub async fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        self.inner.read_exact(buf).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                TransportError::UnexpectedEof
            } else {
                TransportError::Io(e)
            }
        })?;
        Ok(())
    }

    /// Read until EOF, refusing to buffer more than `cap` bytes.
    pub async fn read_to_end_capped(&mut self, cap: usize) -> Result<Vec<u8>, TransportError> {
        let mut out = Vec::new();
        loop {
            let consumed = {
                let available = self.inner.fill_buf().await?;
                if available.is_empty() {
                    return Ok(out);
                }
                if out.len() + available.len() > cap {
                    return Err(TransportError::PayloadTooLarge(cap));
                }
                out.extend_from_slice(available);
                available.len()
            };
            self.inner.consume(consumed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_crlf_terminated_lines() {
        let input: &[u8] = b"GET /home.html HTTP/1.0\r\nHost: x\r\n\r\n";
        let mut reader = LineReader::new(input, 8192);

        assert_eq!(
            reader.read_line().await.unwrap().as_deref(),
            Some("GET /home.html HTTP/1.0")
        );
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("Host: x"));
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(reader.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn tolerates_bare_lf() {
        let input: &[u8] = b"one\ntwo\n";
        let mut reader = LineReader::new(input, 8192);
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("one"));
        assert_eq!(reader.read_line().await.unwrap().as_deref(), Some("two"));
        assert_eq!(reader.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn eof_mid_line_yields_partial() {
        let input: &[u8] = b"no terminator";
        let mut reader = LineReader::new(input, 8192);
        assert_eq!(
            reader.read_line().await.unwrap().as_deref(),
            Some("no terminator")
        );
        assert_eq!(reader.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn overlong_line_is_an_error() {
        let input = vec![b'a'; 64];
        let mut reader = LineReader::new(input.as_slice(), 16);
        assert!(matches!(
            reader.read_line().await,
            Err(TransportError::LineTooLong(16))
        ));
    }

    #[tokio::test]
    async fn read_exact_short_stream_is_unexpected_eof() {
        let input: &[u8] = b"abc";
        let mut reader = LineReader::new(input, 8192);
        let mut buf = [0u8; 8];
        assert!(matches!(
            reader.read_exact(&mut buf).await,
            Err(TransportError::UnexpectedEof)
        ));
    }

    #[tokio::test]
    async fn capped_read_to_end() {
        let input: &[u8] = b"0123456789";
        let mut reader = LineReader::new(input, 8192);
        assert_eq!(reader.read_to_end_capped(32).await.unwrap(), b"0123456789");

        let input: &[u8] = b"0123456789";
        let mut reader = LineReader::new(input, 8192);
        assert!(matches!(
            reader.read_to_end_capped(4).await,
            Err(TransportError::PayloadTooLarge(4))
        ));
    }
}
