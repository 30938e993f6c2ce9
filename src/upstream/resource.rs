//! Fetchable upstream resources.
//!
//! # Responsibilities
//! - Define the `ResourceGetter` capability shared by every forwarding target
//! - Fetch a live HTTP resource and buffer its body
//! - Provide a fixed-reply resource for tests and local stubs
//!
//! # Design Decisions
//! - A fetch never fails: transport and body errors become a 502 `Reply`
//! - Upstream status codes are not propagated, only the body is
//! - The `reqwest::Client` is shared, so every resource reuses one pool

use std::error::Error as StdError;

use futures_util::future::{BoxFuture, FutureExt};

use crate::upstream::Reply;

/// Anything that can be fetched and knows where it is fetched from.
pub trait ResourceGetter: Send + Sync + std::fmt::Debug {
    /// Perform exactly one fetch and turn the outcome into a `Reply`.
    fn fetch(&self) -> BoxFuture<'_, Reply>;

    /// The absolute address this resource is fetched from.
    fn address(&self) -> &str;
}

/// A resource fetched with a single HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpResource {
    address: String,
    client: reqwest::Client,
}

impl HttpResource {
    /// Create a resource; the address must already be validated.
    pub fn new(address: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            address: address.into(),
            client,
        }
    }
}

impl ResourceGetter for HttpResource {
    fn fetch(&self) -> BoxFuture<'_, Reply> {
        async move {
            let response = match self.client.get(&self.address).send().await {
                Ok(response) => response,
                Err(e) => {
                    let message = error_chain(&e);
                    tracing::warn!(address = %self.address, error = %message, "Upstream request failed");
                    return Reply::bad_gateway(message);
                }
            };

            let upstream_status = response.status();
            match response.text().await {
                Ok(text) => {
                    tracing::debug!(
                        address = %self.address,
                        upstream_status = %upstream_status,
                        bytes = text.len(),
                        "Upstream body received"
                    );
                    Reply::ok(text)
                }
                Err(e) => {
                    let message = error_chain(&e);
                    tracing::warn!(address = %self.address, error = %message, "Upstream body read failed");
                    Reply::bad_gateway(message)
                }
            }
        }
        .boxed()
    }

    fn address(&self) -> &str {
        &self.address
    }
}

/// A resource that always answers with the same reply.
#[derive(Debug, Clone)]
pub struct StaticResource {
    address: String,
    reply: Reply,
}

impl StaticResource {
    pub fn new(address: impl Into<String>, reply: Reply) -> Self {
        Self {
            address: address.into(),
            reply,
        }
    }
}

impl ResourceGetter for StaticResource {
    fn fetch(&self) -> BoxFuture<'_, Reply> {
        futures_util::future::ready(self.reply.clone()).boxed()
    }

    fn address(&self) -> &str {
        &self.address
    }
}

/// Render an error together with its sources, outermost first.
///
/// reqwest's own `Display` hides the underlying cause (refused, DNS, TLS).
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[derive(Debug)]
    struct Outer(std::io::Error);

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl StdError for Outer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let err = Outer(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"));
        assert_eq!(error_chain(&err), "error sending request: connection refused");
    }

    #[tokio::test]
    async fn test_static_resource() {
        let res = StaticResource::new("http://stub.local/x", Reply::ok("X"));
        assert_eq!(res.address(), "http://stub.local/x");
        assert_eq!(res.fetch().await, Reply::ok("X"));
        // Same reply every time
        assert_eq!(res.fetch().await.status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_http_resource_unreachable_is_bad_gateway() {
        // Port 9 on loopback (discard) is closed on test hosts.
        let res = HttpResource::new("http://127.0.0.1:9/", reqwest::Client::new());
        let reply = res.fetch().await;
        assert_eq!(reply.status, StatusCode::BAD_GATEWAY);
        assert!(!reply.body.is_empty());
    }
}
