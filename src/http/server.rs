//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all handlers
//! - Wire up middleware (tracing, request ID)
//! - Bind server to listener
//! - Dispatch GETs on forwarding routes to the upstream fetcher
//! - Redirect GETs that differ from a forwarding route by a trailing slash
//! - Classify everything else

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use percent_encoding::percent_decode_str;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::observability::metrics;
use crate::routing::{classify, Forwarder, ForwardingTable};
use crate::upstream::{fetch_timed, Reply};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<ForwardingTable>,
}

/// HTTP server for the echo service.
pub struct EchoServer {
    router: Router,
    table: Arc<ForwardingTable>,
}

impl EchoServer {
    /// Create a server around a frozen forwarding table.
    pub fn new(table: ForwardingTable) -> Self {
        let table = Arc::new(table);
        for fwd in table.iter() {
            tracing::info!(
                route = %fwd.route(),
                address = %fwd.resource().address(),
                "Forwarding route registered"
            );
        }

        let router = Self::build_router(AppState {
            table: table.clone(),
        });
        Self { router, table }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/", any(catch_all))
            .route("/{*token}", any(catch_all))
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The configured router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            forwarders = self.table.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn catch_all(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = decode_path(uri.path());

    if method == Method::GET {
        if let Some(fwd) = state.table.lookup(&path) {
            return forward(fwd).await.into_response();
        }
        if let Some(target) = trailing_slash_redirect(&state.table, &path) {
            tracing::debug!(from = %path, to = %target, "Trailing slash redirect");
            return (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, target)]).into_response();
        }
    }

    let token = path.strip_prefix('/').unwrap_or(path.as_str());
    let reply = classify(token);
    tracing::debug!(
        method = %method,
        token = %token,
        status = %reply.status,
        "Classified request"
    );
    metrics::record_classified(reply.status.as_u16());
    reply.into_response()
}

/// Percent-decode a raw path; invalid UTF-8 becomes U+FFFD.
fn decode_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

/// The forwarding route `path` matches once a trailing slash is added or removed.
fn trailing_slash_redirect(table: &ForwardingTable, path: &str) -> Option<String> {
    let alternate = match path.strip_suffix('/') {
        Some("") => return None,
        Some(trimmed) => trimmed.to_string(),
        None => format!("{}/", path),
    };
    table.lookup(&alternate).map(|fwd| fwd.route().to_string())
}

async fn forward(fwd: &Forwarder) -> Reply {
    let start = Instant::now();
    let reply = fetch_timed(fwd.resource()).await;
    let elapsed = start.elapsed();

    tracing::info!(
        route = %fwd.route(),
        address = %fwd.resource().address(),
        status = %reply.status,
        elapsed = ?elapsed,
        "Forwarded request"
    );
    metrics::record_forwarded(fwd.route(), reply.status.as_u16(), elapsed);
    reply
}
