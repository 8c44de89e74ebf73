//! Error taxonomy for HTTP transactions.
//!
//! Every variant is terminal for the current transaction: detected at the
//! point of failure, rendered as an error page, and the connection closed.
//! There are no retries.

use thiserror::Error;

/// A classified, client-visible transaction failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    /// Request line or URI the server could not make sense of.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Permission denied, or the target is not a regular file.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The resolved resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Any method other than GET or HEAD.
    #[error("method not implemented: {0}")]
    UnsupportedMethod(String),

    /// The relay could not reach the origin or lost it mid-response.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(String),
}

impl HttpError {
    /// Numeric status code for the response line.
    pub fn status(&self) -> u16 {
        match self {
            HttpError::BadRequest(_) => 400,
            HttpError::Forbidden(_) => 403,
            HttpError::NotFound(_) => 404,
            HttpError::UnsupportedMethod(_) => 501,
            HttpError::UpstreamUnavailable(_) => 502,
        }
    }

    /// Short reason phrase matching the status code.
    pub fn reason(&self) -> &'static str {
        match self {
            HttpError::BadRequest(_) => "Bad Request",
            HttpError::Forbidden(_) => "Forbidden",
            HttpError::NotFound(_) => "Not Found",
            HttpError::UnsupportedMethod(_) => "Not Implemented",
            HttpError::UpstreamUnavailable(_) => "Bad Gateway",
        }
    }

    /// The offending input: method, path, or upstream address.
    pub fn cause(&self) -> &str {
        match self {
            HttpError::BadRequest(cause)
            | HttpError::Forbidden(cause)
            | HttpError::NotFound(cause)
            | HttpError::UnsupportedMethod(cause)
            | HttpError::UpstreamUnavailable(cause) => cause,
        }
    }

    /// Long description for the error page body.
    pub fn description(&self) -> &'static str {
        match self {
            HttpError::BadRequest(_) => "The server could not understand this request",
            HttpError::Forbidden(_) => "Access to this resource is denied",
            HttpError::NotFound(_) => "The requested resource could not be found",
            HttpError::UnsupportedMethod(_) => "The server does not implement this method",
            HttpError::UpstreamUnavailable(_) => "The origin server could not be reached",
        }
    }
}

/// Transaction outcome as seen by the connection handler.
///
/// Classified errors get an error page; raw I/O failures mid-response are
/// logged and the connection dropped, since a partial response must never be
/// followed by an error response.
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("connection I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_reason_match() {
        let err = HttpError::NotFound("./missing.html".into());
        assert_eq!(err.status(), 404);
        assert_eq!(err.reason(), "Not Found");
        assert_eq!(err.cause(), "./missing.html");
    }

    #[test]
    fn unsupported_method_is_501() {
        let err = HttpError::UnsupportedMethod("POST".into());
        assert_eq!(err.status(), 501);
        assert_eq!(err.reason(), "Not Implemented");
    }
}
