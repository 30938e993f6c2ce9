//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and upstream fetches produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID (x-request-id) set by middleware, visible in trace spans
//! - Metrics are cheap when no exporter is installed

pub mod logging;
pub mod metrics;
