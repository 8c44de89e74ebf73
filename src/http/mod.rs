//! HTTP/1.0 protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (request line + header block)
//!     → uri.rs (static/dynamic classification, resource path)
//!     → [serve layer dispatches]
//!     → response.rs (response heads, error pages)
//! ```
//!
//! # Design Decisions
//! - HTTP/1.0 only: one request per connection, `Connection: close`,
//!   no chunked transfer, no request bodies
//! - Errors are a closed taxonomy (error.rs); every failure renders a
//!   well-formed HTML page, never a silently dropped connection

pub mod error;
pub mod request;
pub mod response;
pub mod uri;

pub use error::{HttpError, TransactionError};
pub use request::{read_request, Request};
pub use response::{write_error_page, PROTOCOL, SERVER_NAME};
pub use uri::{parse_target, Target};
