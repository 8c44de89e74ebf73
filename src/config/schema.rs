//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for both the
//! origin server and the forwarding relay. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration shared by the origin server and the relay.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Static/dynamic resource resolution (origin server only).
    pub resources: ResourceConfig,

    /// Upstream connection settings (relay only).
    pub upstream: UpstreamConfig,

    /// Wire-level input limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Resource resolution for the origin server.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourceConfig {
    /// Filesystem prefix every requested path is resolved under.
    pub root: String,

    /// Document served when a request targets a directory ("/").
    pub default_document: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            default_document: "home.html".to_string(),
        }
    }
}

/// Upstream settings for the forwarding relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Port assumed when an absolute-form URI names none.
    pub default_port: u16,

    /// Upper bound on a buffered upstream response, in bytes.
    /// Responses past this bound are refused, never truncated silently.
    pub max_relay_bytes: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            default_port: 80,
            max_relay_bytes: 102_400,
        }
    }
}

/// Wire-level input limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum accepted length of a single request or header line, in bytes.
    pub max_line_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: 8192,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Replace the configured bind address port, keeping the host part.
    /// The CLI's positional port argument wins over the config file.
    pub fn override_port(&mut self, port: u16) {
        let host = self
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host)
            .unwrap_or("0.0.0.0")
            .to_string();
        self.listener.bind_address = format!("{}:{}", host, port);
    }
}
