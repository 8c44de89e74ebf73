//! Iterative HTTP/1.0 web serving library.
//!
//! Two servers over one protocol core: [`OriginServer`] serves static files
//! and subprocess-generated dynamic content, [`RelayServer`] forwards one
//! request at a time to an origin named by an absolute-form URI.

pub mod config;
pub mod http;
pub mod net;
pub mod observability;
pub mod proxy;
pub mod serve;

pub use config::ServerConfig;
pub use proxy::RelayServer;
pub use serve::OriginServer;
