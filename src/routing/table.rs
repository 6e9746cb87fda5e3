//! Route table module
//!
//! Exact-match lookup of `(method, path)` pairs. No patterns, no parameter
//! extraction, no trailing-slash or query-string normalization.

use crate::config::RoutesConfig;
use crate::logger;
use hyper::Method;
use std::collections::HashMap;

/// What to do with a matched request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteHandler {
    /// Static plain-text greeting
    Greeting,
    /// Whole guest list, served verbatim from the store
    GuestList,
    /// Single guest at a zero-based position
    Guest(usize),
}

/// Immutable `(method, path) -> handler` mapping
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, HashMap<Method, RouteHandler>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the standard table from configuration
    pub fn from_config(cfg: &RoutesConfig) -> Self {
        let mut table = Self::new();
        table.register(Method::GET, &cfg.greeting_path, RouteHandler::Greeting);
        table.register(Method::GET, &cfg.guests_path, RouteHandler::GuestList);

        let base = cfg.guests_path.trim_end_matches('/');
        for &index in &cfg.guest_indices {
            table.register(Method::GET, &format!("{base}/{index}"), RouteHandler::Guest(index));
        }
        table
    }

    /// Insert a route, returning the handler it replaced
    pub fn insert(
        &mut self,
        method: Method,
        path: &str,
        handler: RouteHandler,
    ) -> Option<RouteHandler> {
        self.routes
            .entry(path.to_string())
            .or_default()
            .insert(method, handler)
    }

    fn register(&mut self, method: Method, path: &str, handler: RouteHandler) {
        if let Some(previous) = self.insert(method.clone(), path, handler) {
            logger::log_warning(&format!(
                "Route {method} {path} registered twice: {previous:?} replaced by {handler:?}"
            ));
        }
    }

    pub fn lookup(&self, method: &Method, path: &str) -> Option<RouteHandler> {
        self.routes.get(path)?.get(method).copied()
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
