//! Request line and header block reading.

use tokio::io::AsyncRead;

use crate::http::error::HttpError;
use crate::net::transport::LineReader;

/// One parsed HTTP/1.0 request. Read-only after creation; one per
/// connection, discarded when the transaction ends.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    /// Raw URI exactly as sent on the request line.
    pub target: String,
    pub version: String,
    /// Raw header lines, retained in arrival order. The core consults none
    /// of them; they are echoed to the log and otherwise ignored.
    pub headers: Vec<String>,
}

impl Request {
    /// GET and HEAD are the only methods the server implements.
    pub fn is_supported_method(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET") || self.method.eq_ignore_ascii_case("HEAD")
    }

    pub fn is_head(&self) -> bool {
        self.method.eq_ignore_ascii_case("HEAD")
    }
}

/// Read the request line and header block up to the blank-line terminator.
pub async fn read_request<R>(reader: &mut LineReader<R>) -> Result<Request, HttpError>
where
    R: AsyncRead + Unpin,
{
    let line = reader
        .read_line()
        .await
        .map_err(|e| HttpError::BadRequest(e.to_string()))?
        .ok_or_else(|| HttpError::BadRequest("empty request".into()))?;

    let mut parts = line.split_whitespace();
    let (method, target, version) = match (parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version)) => {
            (method.to_string(), target.to_string(), version.to_string())
        }
        _ => return Err(HttpError::BadRequest(line)),
    };

    tracing::debug!(method = %method, target = %target, version = %version, "Request line");

    let mut headers = Vec::new();
    loop {
        let header = reader
            .read_line()
            .await
            .map_err(|e| HttpError::BadRequest(e.to_string()))?
            .unwrap_or_default();
        if header.is_empty() {
            break;
        }
        tracing::debug!(header = %header, "Request header");
        headers.push(header);
    }

    Ok(Request {
        method,
        target,
        version,
        headers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read(input: &[u8]) -> Result<Request, HttpError> {
        let mut reader = LineReader::new(input, 8192);
        read_request(&mut reader).await
    }

    #[tokio::test]
    async fn parses_request_line_and_headers() {
        let req = read(b"GET /home.html HTTP/1.0\r\nHost: localhost\r\nAccept: */*\r\n\r\n")
            .await
            .unwrap();
        assert_eq!(req.method, "GET");
        assert_eq!(req.target, "/home.html");
        assert_eq!(req.version, "HTTP/1.0");
        assert_eq!(req.headers, vec!["Host: localhost", "Accept: */*"]);
        assert!(req.is_supported_method());
        assert!(!req.is_head());
    }

    #[tokio::test]
    async fn head_is_supported_case_insensitively() {
        let req = read(b"head / HTTP/1.0\r\n\r\n").await.unwrap();
        assert!(req.is_supported_method());
        assert!(req.is_head());
    }

    #[tokio::test]
    async fn post_is_not_supported() {
        let req = read(b"POST /form HTTP/1.0\r\n\r\n").await.unwrap();
        assert!(!req.is_supported_method());
    }

    #[tokio::test]
    async fn short_request_line_is_bad_request() {
        let err = read(b"GET\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, HttpError::BadRequest(_)));
    }

    #[tokio::test]
    async fn empty_stream_is_bad_request() {
        let err = read(b"").await.unwrap_err();
        assert!(matches!(err, HttpError::BadRequest(_)));
    }

    #[tokio::test]
    async fn overlong_request_line_is_bad_request() {
        let mut raw = Vec::from(&b"GET /"[..]);
        raw.extend(std::iter::repeat(b'a').take(16 * 1024));
        raw.extend_from_slice(b" HTTP/1.0\r\n\r\n");

        let mut reader = LineReader::new(raw.as_slice(), 8192);
        let err = read_request(&mut reader).await.unwrap_err();
        assert!(matches!(err, HttpError::BadRequest(_)));
    }
}
