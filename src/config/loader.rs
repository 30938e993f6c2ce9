//! Configuration loading from disk.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::EchoConfig;
use crate::config::validation::{validate_config, ForwardError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ForwardError>),

    #[error("Invalid metrics address `{address}`: {source}")]
    MetricsAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Metrics exporter failed to start: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("Invalid bind address `{address}`: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

fn join_errors(errors: &[ForwardError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<EchoConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: EchoConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;
    metrics_listen_addr(&config)?;

    Ok(config)
}

/// Parsed metrics address, `None` when the exporter is disabled.
pub fn metrics_listen_addr(config: &EchoConfig) -> Result<Option<SocketAddr>, ConfigError> {
    let observability = &config.observability;
    if !observability.metrics_enabled {
        return Ok(None);
    }
    observability
        .metrics_address
        .parse()
        .map(Some)
        .map_err(|source| ConfigError::MetricsAddress {
            address: observability.metrics_address.clone(),
            source,
        })
}
