//! Forwarding rules and the frozen table that holds them.
//!
//! # Responsibilities
//! - Bind validated targets to live HTTP resources
//! - Prepend the built-in forwarders
//! - Look up the forwarder for an exact request path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Duplicate routes are kept; lookup returns the first registered
//! - O(n) scan, route counts are tiny

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::ForwardTarget;
use crate::upstream::{HttpResource, ResourceGetter};

/// Public "what is my IP" service.
pub const IPIFY_ADDRESS: &str = "https://api.ipify.org";

/// One forwarding rule: an inbound route and the resource behind it.
#[derive(Debug, Clone)]
pub struct Forwarder {
    route: String,
    resource: Arc<dyn ResourceGetter>,
}

impl Forwarder {
    pub fn new(route: impl Into<String>, resource: Arc<dyn ResourceGetter>) -> Self {
        Self {
            route: route.into(),
            resource,
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn resource(&self) -> &dyn ResourceGetter {
        self.resource.as_ref()
    }
}

/// Routes that exist regardless of configuration.
pub fn builtin_forwarders(client: &reqwest::Client) -> Vec<Forwarder> {
    vec![Forwarder::new(
        "/getip",
        Arc::new(HttpResource::new(IPIFY_ADDRESS, client.clone())),
    )]
}

/// Ordered, read-only set of forwarders.
#[derive(Debug, Clone, Default)]
pub struct ForwardingTable {
    forwarders: Vec<Forwarder>,
}

impl ForwardingTable {
    /// Build from an explicit list, keeping order.
    pub fn new(forwarders: Vec<Forwarder>) -> Self {
        let mut seen = HashSet::new();
        for fwd in &forwarders {
            if !seen.insert(fwd.route()) {
                tracing::warn!(
                    route = %fwd.route(),
                    address = %fwd.resource().address(),
                    "Duplicate forwarding route, earlier registration wins"
                );
            }
        }
        Self { forwarders }
    }

    /// Built-in forwarders first, then `targets` in configuration order.
    pub fn from_targets(targets: Vec<ForwardTarget>, client: &reqwest::Client) -> Self {
        let mut forwarders = builtin_forwarders(client);
        forwarders.extend(targets.into_iter().map(|t| {
            Forwarder::new(t.route, Arc::new(HttpResource::new(t.address, client.clone())))
        }));
        Self::new(forwarders)
    }

    /// First forwarder whose route equals `path`.
    pub fn lookup(&self, path: &str) -> Option<&Forwarder> {
        self.forwarders.iter().find(|f| f.route == path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Forwarder> {
        self.forwarders.iter()
    }

    pub fn len(&self) -> usize {
        self.forwarders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forwarders.is_empty()
    }
}
