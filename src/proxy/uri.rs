//! Absolute-form URI decomposition for the forwarding relay.

use crate::http::HttpError;

/// The origin a relayed request is destined for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub host: String,
    pub port: u16,
    /// Request path, always carrying its leading `/`.
    pub path: String,
}

impl std::fmt::Display for Upstream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}{}", self.host, self.port, self.path)
    }
}

/// Decompose `http://host[:port][/path]` into its origin parts.
///
/// The scheme is tolerated, not validated, beyond requiring the `//`
/// authority marker. A missing port falls back to `default_port`; a missing
/// path becomes `/`. Origin-form targets and empty hosts are parse failures
/// surfaced as client errors.
pub fn parse_upstream(uri: &str, default_port: u16) -> Result<Upstream, HttpError> {
    let malformed = || HttpError::BadRequest(uri.to_string());

    let slash = uri.find('/').ok_or_else(malformed)?;
    let authority = uri[slash..].strip_prefix("//").ok_or_else(malformed)?;

    let (host, port, path) = match (authority.find(':'), authority.find('/')) {
        (Some(colon), Some(slash)) if colon < slash => {
            let port = authority[colon + 1..slash]
                .parse::<u16>()
                .map_err(|_| malformed())?;
            (&authority[..colon], port, &authority[slash..])
        }
        (Some(colon), None) => {
            let port = authority[colon + 1..]
                .parse::<u16>()
                .map_err(|_| malformed())?;
            (&authority[..colon], port, "/")
        }
        (_, Some(slash)) => (&authority[..slash], default_port, &authority[slash..]),
        (None, None) => (authority, default_port, "/"),
    };

    if host.is_empty() {
        return Err(malformed());
    }

    Ok(Upstream {
        host: host.to_string(),
        port,
        path: path.to_string(),
    })
}
