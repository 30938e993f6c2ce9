//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional) + CLI flags
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (forwarding token checks)
//!     → EchoConfig (validated, immutable)
//!     → ForwardingTable built once, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, metrics_listen_addr, ConfigError};
pub use schema::{EchoConfig, ListenerConfig, ObservabilityConfig, OutboundConfig};
pub use validation::{parse_forward, validate_config, ForwardError, ForwardTarget};
