//! Declarative route tables.
//!
//! A route table is a JSON document listing routes with a handler label each:
//!
//! ```json
//! {
//!   "ignore_trailing_slashes": false,
//!   "routes": [
//!     { "method": "GET", "path": "/users/:id", "handler": "show_user" },
//!     { "method": "before", "path": "*", "handler": "log" }
//!   ]
//! }
//! ```
//!
//! The labels stand in for real handlers, which makes tables handy for
//! inspecting how a set of templates resolves without running a server.

use serde::Deserialize;

use crate::config::RegistryConfig;
use crate::error::Result;
use crate::method::Method;
use crate::registry::RouteRegistry;

/// One row of a route table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteSpec {
    /// Method, case-insensitive.
    pub method: Method,
    /// Route template.
    pub path: String,
    /// Handler label. Defaults to the template itself.
    #[serde(default)]
    pub handler: Option<String>,
}

impl RouteSpec {
    /// The handler label, falling back to the template.
    pub fn handler_label(&self) -> &str {
        self.handler.as_deref().unwrap_or(&self.path)
    }
}

/// A parsed route table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteTable {
    /// Registry options.
    #[serde(flatten)]
    pub config: RegistryConfig,
    /// Routes, in priority order.
    #[serde(default)]
    pub routes: Vec<RouteSpec>,
}

impl RouteTable {
    /// Parses a table from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builds a registry whose handlers are the table's labels.
    pub fn into_registry(self) -> RouteRegistry<String> {
        let mut registry = RouteRegistry::with_config(self.config);
        for spec in &self.routes {
            let label = spec.handler_label().to_string();
            registry.register(spec.method, &spec.path, label.clone(), label);
        }
        registry
    }
}
