//! Response assembly and the error reporter.
//!
//! Responses are written incrementally to the connection; the error page is
//! the only fully self-contained response path, independent of filesystem
//! and subprocess state.

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::error::HttpError;

/// Value of the `Server` identification header.
pub const SERVER_NAME: &str = "webserv";

/// Protocol version emitted on every response line.
pub const PROTOCOL: &str = "HTTP/1.0";

/// Render a classified error as a complete HTML response.
///
/// Status line with code and phrase, `Content-type: text/html`,
/// `Content-length` matching the exact body, then an HTML body embedding
/// the cause and description.
pub async fn write_error_page<W>(writer: &mut W, err: &HttpError) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = format!(
        "<html><title>{server} error</title><body bgcolor=\"ffffff\">\r\n\
         {status}: {reason}\r\n\
         <p>{description}: {cause}\r\n\
         <hr><em>{server}</em>\r\n</body></html>\r\n",
        server = SERVER_NAME,
        status = err.status(),
        reason = err.reason(),
        description = err.description(),
        cause = err.cause(),
    );
    let head = format!(
        "{} {} {}\r\nContent-type: text/html\r\nContent-length: {}\r\n\r\n",
        PROTOCOL,
        err.status(),
        err.reason(),
        body.len(),
    );

    writer.write_all(head.as_bytes()).await?;
    writer.write_all(body.as_bytes()).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: &HttpError) -> String {
        let mut out: Vec<u8> = Vec::new();
        write_error_page(&mut out, err).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn error_page_embeds_cause() {
        let page = render(&HttpError::NotFound("./no/such/file".into())).await;
        assert!(page.starts_with("HTTP/1.0 404 Not Found\r\n"));
        assert!(page.contains("Content-type: text/html"));
        assert!(page.contains("./no/such/file"));
    }

    #[tokio::test]
    async fn content_length_matches_body() {
        let page = render(&HttpError::Forbidden("./secret".into())).await;
        let (head, body) = page.split_once("\r\n\r\n").unwrap();
        let declared: usize = head
            .lines()
            .find_map(|line| line.strip_prefix("Content-length: "))
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(declared, body.len());
    }
}
