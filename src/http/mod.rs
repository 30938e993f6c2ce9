//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace span)
//!     → dispatch: GET on a forwarding route?
//!         yes → upstream::fetch_timed → Reply
//!         no  → routing::classify → Reply
//!     → Reply into text/plain response
//! ```

pub mod server;

pub use server::{AppState, EchoServer};
