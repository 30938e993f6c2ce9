//! Upstream fetch subsystem.
//!
//! # Data Flow
//! ```text
//! Forwarded request
//!     → timing.rs (start clock)
//!     → resource.rs (ResourceGetter::fetch, one GET)
//!     → Reply { 200, body } or Reply { 502, error }
//!     → timing.rs (wrap body with delay + address)
//! ```

pub mod reply;
pub mod resource;
pub mod timing;

pub use reply::Reply;
pub use resource::{HttpResource, ResourceGetter, StaticResource};
pub use timing::fetch_timed;
