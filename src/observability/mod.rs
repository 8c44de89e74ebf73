//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; every transaction carries a
//!   connection id field for correlation
//! - Log level comes from config, overridable with RUST_LOG

pub mod logging;

pub use logging::init_logging;
