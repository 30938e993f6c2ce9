//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, decoded path)
//!     → forwarder.rs (GET + exact route match?)
//!         yes → upstream fetch (timed)
//!         no  → classifier.rs (path token → Reply)
//!
//! Table Compilation (at startup):
//!     built-ins + ForwardTarget[]
//!     → bind to shared HTTP client
//!     → Freeze as immutable ForwardingTable
//! ```

pub mod classifier;
pub mod forwarder;

pub use classifier::classify;
pub use forwarder::{Forwarder, ForwardingTable};
