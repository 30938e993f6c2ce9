//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the echo server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EchoConfig {
    /// Listener configuration (bind host and port).
    pub listener: ListenerConfig,

    /// Forwarding tokens, `<route>:<url>`, in registration order.
    pub forwards: Vec<String>,

    /// Outbound HTTP client settings.
    pub outbound: OutboundConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl EchoConfig {
    /// `host:port` string the listener binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.listener.host, self.listener.port)
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: default_host().to_string(),
            port: 54321,
        }
    }
}

/// Windows only accepts loopback without a firewall prompt.
pub fn default_host() -> &'static str {
    if cfg!(windows) {
        "localhost"
    } else {
        "0.0.0.0"
    }
}

/// Outbound HTTP client configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OutboundConfig {
    /// Skip TLS peer verification for upstream fetches.
    pub accept_invalid_certs: bool,

    /// Whole-request timeout in seconds. `None` keeps the client default.
    pub timeout_secs: Option<u64>,
}

impl OutboundConfig {
    /// Build the shared client every forwarder fetches through.
    pub fn build_client(&self) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if self.accept_invalid_certs {
            tracing::warn!("Outbound TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
