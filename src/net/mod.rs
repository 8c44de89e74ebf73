//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept)
//!     → connection.rs (id for log correlation)
//!     → transport.rs (buffered line reads over the stream)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - One connection handled to completion before the next accept
//! - Line reads are length-bounded with explicit overflow errors

pub mod connection;
pub mod listener;
pub mod transport;

pub use connection::ConnectionId;
pub use listener::{Listener, ListenerError};
pub use transport::{LineReader, TransportError};
