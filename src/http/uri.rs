//! URI classification for the origin server.
//!
//! # Design Decisions
//! - A URI is dynamic iff it contains the literal substring `cgi-bin`,
//!   anywhere; placing executables under `/cgi-bin/` is caller convention
//! - No URL-decoding and no path-traversal sanitization: `..` segments pass
//!   through unchanged (known limitation)

use std::path::{Path, PathBuf};

use crate::config::ResourceConfig;

/// Substring marking a URI as dynamic content.
const DYNAMIC_MARKER: &str = "cgi-bin";

/// A request target resolved against the resource root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A local file served byte-for-byte.
    Static { path: PathBuf },
    /// A local program executed to produce the response.
    Dynamic { path: PathBuf, query: String },
}

impl Target {
    pub fn path(&self) -> &Path {
        match self {
            Target::Static { path } | Target::Dynamic { path, .. } => path,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, Target::Dynamic { .. })
    }
}

/// Classify a request URI and derive the local resource path.
///
/// Static: path is root + URI, with the default document appended when the
/// URI names a directory. Dynamic: the URI is split at the first `?`; the
/// remainder becomes the query string passed to the program.
pub fn parse_target(uri: &str, resources: &ResourceConfig) -> Target {
    if !uri.contains(DYNAMIC_MARKER) {
        let mut path = format!("{}{}", resources.root, uri);
        if uri.ends_with('/') {
            path.push_str(&resources.default_document);
        }
        Target::Static {
            path: PathBuf::from(path),
        }
    } else {
        let (resource, query) = match uri.split_once('?') {
            Some((resource, query)) => (resource, query.to_string()),
            None => (uri, String::new()),
        };
        Target::Dynamic {
            path: PathBuf::from(format!("{}{}", resources.root, resource)),
            query,
        }
    }
}
