//! The (status, body) value produced by every decision in the server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A synthetic reply: status code plus plain-text body.
///
/// Built once per request decision and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: String,
}

impl Reply {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, body)
    }

    /// Reply used when an upstream fetch fails.
    pub fn bad_gateway(body: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, body)
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, self.body).into_response()
    }
}
