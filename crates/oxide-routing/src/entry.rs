//! Registered routes.

use crate::method::Method;
use crate::params::PathParams;
use crate::path::CompiledRoute;

/// A single registered route.
///
/// Ties a compiled template to the method it was registered under and the
/// two handler values supplied by the host: the handler as it will be
/// dispatched and the handler as the user originally wrote it (before any
/// wrapping). Neither is ever called from this crate.
#[derive(Debug, Clone)]
pub struct RouteEntry<H> {
    method: Method,
    route: CompiledRoute,
    handler: H,
    raw_handler: H,
}

impl<H> RouteEntry<H> {
    /// Creates a new entry, compiling `template`.
    pub fn new(method: Method, template: &str, handler: H, raw_handler: H) -> Self {
        Self {
            method,
            route: CompiledRoute::new(template),
            handler,
            raw_handler,
        }
    }

    /// The method this route was registered under.
    pub fn method(&self) -> Method {
        self.method
    }

    /// The template as registered.
    pub fn template(&self) -> &str {
        self.route.template()
    }

    /// The compiled template.
    pub fn route(&self) -> &CompiledRoute {
        &self.route
    }

    /// The handler to dispatch to.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The handler as originally supplied, before any wrapping.
    pub fn raw_handler(&self) -> &H {
        &self.raw_handler
    }

    /// Returns true if `path` matches this route's template.
    ///
    /// This is the bare template match; see
    /// [`RouteRegistry::matches`](crate::RouteRegistry::matches) for the
    /// check that also applies the registry's shortcuts and trailing-slash
    /// policy.
    pub fn matches(&self, path: &str) -> bool {
        self.route.matches(path)
    }

    /// Extracts path parameters. Empty if `path` does not match.
    pub fn extract_params(&self, path: &str) -> PathParams {
        self.route.extract_params(path)
    }

    /// Extracts splat values in order. Empty if `path` does not match.
    pub fn extract_splats(&self, path: &str) -> Vec<String> {
        self.route.extract_splats(path)
    }
}
