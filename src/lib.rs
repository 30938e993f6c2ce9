//! Configurable HTTP echo/mock server library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::EchoConfig;
pub use http::EchoServer;
pub use lifecycle::Shutdown;
pub use routing::{classify, ForwardingTable};
pub use upstream::Reply;
