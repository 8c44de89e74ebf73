//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (non-zero limits, parsable bind address)
//! - Reject values the wire protocol cannot honor
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    BindAddress(String),

    #[error("resources.default_document must not be empty")]
    EmptyDefaultDocument,

    #[error("resources.default_document {0:?} must be a bare file name")]
    DefaultDocumentHasSeparator(String),

    #[error("upstream.max_relay_bytes must be greater than zero")]
    ZeroRelayBound,

    #[error("limits.max_line_bytes must be greater than zero")]
    ZeroLineBound,

    #[error("observability.log_level {0:?} is not a known level")]
    UnknownLogLevel(String),
}

const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.resources.default_document.is_empty() {
        errors.push(ValidationError::EmptyDefaultDocument);
    } else if config.resources.default_document.contains('/') {
        errors.push(ValidationError::DefaultDocumentHasSeparator(
            config.resources.default_document.clone(),
        ));
    }

    if config.upstream.max_relay_bytes == 0 {
        errors.push(ValidationError::ZeroRelayBound);
    }

    if config.limits.max_line_bytes == 0 {
        errors.push(ValidationError::ZeroLineBound);
    }

    if !KNOWN_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
