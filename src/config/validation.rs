//! Configuration validation.
//!
//! # Responsibilities
//! - Parse `<route>:<url>` forwarding tokens into validated targets
//! - Default a missing scheme to `http://`
//! - Reject tokens without a route slash, a URL, or a host
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: EchoConfig → Result<Vec<ForwardTarget>, Vec<ForwardError>>
//! - Runs before the server binds its listener

use thiserror::Error;
use url::Url;

use crate::config::schema::EchoConfig;

/// A forwarding token that failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForwardError {
    /// No `:` separating route and URL.
    #[error("forward `{token}`: wrong format, expected <route>:<url>")]
    Format { token: String },

    #[error("forward `{token}`: route part should start with '/'")]
    MissingSlash { token: String },

    #[error("forward `{token}`: url parsing error ({source})")]
    InvalidUrl {
        token: String,
        #[source]
        source: url::ParseError,
    },

    #[error("forward `{token}`: host part not found")]
    MissingHost { token: String },
}

/// A validated forwarding rule, not yet bound to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardTarget {
    pub route: String,
    pub address: String,
}

/// Parse one `<route>:<url>` token.
pub fn parse_forward(token: &str) -> Result<ForwardTarget, ForwardError> {
    let (route, address) = token.split_once(':').ok_or_else(|| ForwardError::Format {
        token: token.to_string(),
    })?;

    if !route.starts_with('/') {
        return Err(ForwardError::MissingSlash {
            token: token.to_string(),
        });
    }

    let address = if address.starts_with("http") {
        address.to_string()
    } else {
        format!("http://{}", address)
    };

    let url = Url::parse(&address).map_err(|source| ForwardError::InvalidUrl {
        token: token.to_string(),
        source,
    })?;

    // The URL parser forgives missing or extra slashes after the scheme
    // ("https:/h", "http:///h"), so the authority is checked on the raw text.
    let has_host = raw_authority(&address).is_some_and(|a| !a.is_empty())
        && url.host_str().is_some_and(|h| !h.is_empty());
    if !has_host {
        return Err(ForwardError::MissingHost {
            token: token.to_string(),
        });
    }

    Ok(ForwardTarget {
        route: route.to_string(),
        address,
    })
}

/// Text between `scheme://` and the following path, query, or fragment.
fn raw_authority(address: &str) -> Option<&str> {
    let (_, rest) = address.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Validate every forwarding token in the configuration.
pub fn validate_config(config: &EchoConfig) -> Result<Vec<ForwardTarget>, Vec<ForwardError>> {
    let mut targets = Vec::with_capacity(config.forwards.len());
    let mut errors = Vec::new();

    for token in &config.forwards {
        match parse_forward(token) {
            Ok(target) => targets.push(target),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(targets)
    } else {
        Err(errors)
    }
}
