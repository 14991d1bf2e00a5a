//! The route registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::RegistryConfig;
use crate::decode::{PercentDecoder, UrlDecode};
use crate::entry::RouteEntry;
use crate::method::Method;
use crate::params::PathParams;

/// Registered routes, grouped by method.
///
/// Routes are registered during startup through `&mut self`; after that the
/// registry is only read, so it can be shared (for example in an `Arc`)
/// across request handlers without locking. Registration order is match
/// priority: [`find_candidates`](Self::find_candidates) never reorders
/// routes by specificity.
///
/// The handler type `H` is opaque to the registry.
///
/// # Example
///
/// ```
/// use oxide_routing::{Method, RouteRegistry};
///
/// let mut registry = RouteRegistry::new();
/// registry.register(Method::Get, "/users/:id", "show_user", "show_user");
/// registry.register(Method::Get, "/users/*", "user_files", "user_files");
///
/// let candidates = registry.find_candidates(Method::Get, "/users/42");
/// assert_eq!(candidates.len(), 2);
///
/// let params = registry.extract_params(candidates[0], "/users/42");
/// assert_eq!(params.get("id"), Some("42"));
/// ```
pub struct RouteRegistry<H> {
    /// Routes per method, in registration order.
    entries: BTreeMap<Method, Vec<RouteEntry<H>>>,
    config: RegistryConfig,
    decoder: Arc<dyn UrlDecode>,
}

impl<H> Default for RouteRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for RouteRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routes: Vec<(Method, &str)> = self
            .iter()
            .map(|e| (e.method(), e.template()))
            .collect();
        f.debug_struct("RouteRegistry")
            .field("routes", &routes)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<H> RouteRegistry<H> {
    /// Creates an empty registry with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with the given configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: BTreeMap::new(),
            config,
            decoder: Arc::new(PercentDecoder),
        }
    }

    /// Replaces the decoder applied to extracted values.
    #[must_use]
    pub fn with_decoder(mut self, decoder: impl UrlDecode + 'static) -> Self {
        self.decoder = Arc::new(decoder);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Compiles `template` and appends a route for `method`.
    pub fn register(&mut self, method: Method, template: &str, handler: H, raw_handler: H) {
        debug!(%method, template, "Registering route");
        self.entries
            .entry(method)
            .or_default()
            .push(RouteEntry::new(method, template, handler, raw_handler));
    }

    /// Returns the routes accepting `path` for `method`, in registration
    /// order.
    pub fn find_candidates(&self, method: Method, path: &str) -> Vec<&RouteEntry<H>> {
        self.entries(method)
            .iter()
            .filter(|entry| self.matches(entry, path))
            .collect()
    }

    /// Returns true if `entry` accepts `path` under this registry's rules.
    ///
    /// The template `*` and a template equal to the path match without
    /// running the matcher. With strict trailing slashes, a template and path
    /// that disagree on ending in `/` are rejected before the matcher runs.
    pub fn matches(&self, entry: &RouteEntry<H>, path: &str) -> bool {
        let template = entry.template();
        if template == "*" || template == path {
            return true;
        }
        if !self.config.ignore_trailing_slashes && slash_mismatch(template, path) {
            return false;
        }
        entry.matches(path)
    }

    /// Extracts path parameters from `path` using the registry's decoder.
    ///
    /// Only meaningful once `entry` is known to match; an empty result means
    /// "not applicable".
    pub fn extract_params(&self, entry: &RouteEntry<H>, path: &str) -> PathParams {
        entry.route().extract_params_with(path, self.decoder.as_ref())
    }

    /// Extracts splat values from `path` using the registry's decoder.
    pub fn extract_splats(&self, entry: &RouteEntry<H>, path: &str) -> Vec<String> {
        entry.route().extract_splats_with(path, self.decoder.as_ref())
    }

    /// Returns the first route, across all methods, satisfying `predicate`.
    ///
    /// Methods are visited in [`Method`] declaration order and routes in
    /// registration order. If several routes qualify a warning is logged and
    /// the first one is returned.
    pub fn find_first<P>(&self, mut predicate: P) -> Option<&RouteEntry<H>>
    where
        P: FnMut(&RouteEntry<H>) -> bool,
    {
        let mut found = self.iter().filter(|entry| predicate(*entry));
        let first = found.next()?;
        if found.next().is_some() {
            warn!(
                method = %first.method(),
                template = first.template(),
                "More than one route found, returning first match"
            );
        }
        Some(first)
    }

    /// Returns the template of the first route satisfying `predicate`.
    ///
    /// Typically used to find the path a given handler is mounted on.
    pub fn find_template<P>(&self, predicate: P) -> Option<&str>
    where
        P: FnMut(&RouteEntry<H>) -> bool,
    {
        self.find_first(predicate).map(RouteEntry::template)
    }

    /// Returns the routes registered for `method`, in registration order.
    pub fn entries(&self, method: Method) -> &[RouteEntry<H>] {
        self.entries
            .get(&method)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates over every route, grouped by method.
    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<H>> {
        self.entries.values().flatten()
    }

    /// Total number of registered routes.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Returns true if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<H: Clone> RouteRegistry<H> {
    /// Adds a route whose raw handler is the handler itself.
    #[must_use]
    pub fn route(mut self, method: Method, template: &str, handler: H) -> Self {
        self.register(method, template, handler.clone(), handler);
        self
    }

    /// Adds a GET route.
    #[must_use]
    pub fn get(self, template: &str, handler: H) -> Self {
        self.route(Method::Get, template, handler)
    }

    /// Adds a POST route.
    #[must_use]
    pub fn post(self, template: &str, handler: H) -> Self {
        self.route(Method::Post, template, handler)
    }

    /// Adds a PUT route.
    #[must_use]
    pub fn put(self, template: &str, handler: H) -> Self {
        self.route(Method::Put, template, handler)
    }

    /// Adds a PATCH route.
    #[must_use]
    pub fn patch(self, template: &str, handler: H) -> Self {
        self.route(Method::Patch, template, handler)
    }

    /// Adds a DELETE route.
    #[must_use]
    pub fn delete(self, template: &str, handler: H) -> Self {
        self.route(Method::Delete, template, handler)
    }

    /// Adds a before-filter.
    #[must_use]
    pub fn before(self, template: &str, handler: H) -> Self {
        self.route(Method::Before, template, handler)
    }

    /// Adds an after-filter.
    #[must_use]
    pub fn after(self, template: &str, handler: H) -> Self {
        self.route(Method::After, template, handler)
    }
}

/// True if one side ends in `/` and the other does not.
fn slash_mismatch(template: &str, path: &str) -> bool {
    template.ends_with('/') != path.ends_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    fn templates<H>(entries: &[&RouteEntry<H>]) -> Vec<String> {
        entries.iter().map(|e| e.template().to_string()).collect()
    }

    #[test]
    fn test_basic_routing() {
        let registry = RouteRegistry::new()
            .get("/", "index")
            .get("/users/:id", "user");

        let found = registry.find_candidates(Method::Get, "/users/123");
        assert_eq!(found.len(), 1);
        assert_eq!(*found[0].handler(), "user");
        assert!(registry.find_candidates(Method::Post, "/users/123").is_empty());
    }

    #[test]
    fn test_candidates_keep_registration_order() {
        let registry = RouteRegistry::new()
            .get("/users/*", "splat")
            .get("/users/:id", "param")
            .get("/users/42", "exact")
            .get("/posts/:id", "other");

        let found = registry.find_candidates(Method::Get, "/users/42");
        assert_eq!(templates(&found), ["/users/*", "/users/:id", "/users/42"]);
    }

    #[test]
    fn test_lone_splat_always_matches() {
        let registry = RouteRegistry::new().before("*", "log");
        assert_eq!(registry.find_candidates(Method::Before, "/").len(), 1);
        assert_eq!(registry.find_candidates(Method::Before, "").len(), 1);
        assert_eq!(registry.find_candidates(Method::Before, "/a/b/c/").len(), 1);
    }

    #[test]
    fn test_exact_match_shortcut() {
        let registry = RouteRegistry::with_config(RegistryConfig::strict()).get("/a/", "a");
        assert_eq!(registry.find_candidates(Method::Get, "/a/").len(), 1);
    }

    #[test]
    fn test_lenient_trailing_slashes() {
        let registry = RouteRegistry::new().get("/hello", "hello");
        assert_eq!(registry.find_candidates(Method::Get, "/hello").len(), 1);
        assert_eq!(registry.find_candidates(Method::Get, "/hello/").len(), 1);
    }

    #[test]
    fn test_strict_trailing_slashes() {
        let registry = RouteRegistry::with_config(RegistryConfig::strict())
            .get("/hello", "hello")
            .get("/dir/", "dir")
            .get("/users/:id", "user");

        assert_eq!(registry.find_candidates(Method::Get, "/hello").len(), 1);
        assert!(registry.find_candidates(Method::Get, "/hello/").is_empty());
        assert!(registry.find_candidates(Method::Get, "/dir").is_empty());
        assert!(registry.find_candidates(Method::Get, "/users/1/").is_empty());
        assert_eq!(registry.find_candidates(Method::Get, "/users/1").len(), 1);
    }

    #[test]
    fn test_slash_mismatch() {
        assert!(slash_mismatch("/a", "/a/"));
        assert!(slash_mismatch("/a/", "/a"));
        assert!(!slash_mismatch("/a/", "/b/"));
        assert!(!slash_mismatch("/a", "/b"));
        assert!(!slash_mismatch("", ""));
    }

    #[test]
    fn test_register_keeps_both_handlers() {
        let mut registry = RouteRegistry::new();
        registry.register(Method::Put, "/items/:id", "wrapped", "raw");

        let entry = &registry.entries(Method::Put)[0];
        assert_eq!(*entry.handler(), "wrapped");
        assert_eq!(*entry.raw_handler(), "raw");
        assert_eq!(registry.len(), 1);
        assert!(registry.entries(Method::Get).is_empty());
    }

    /// Collects formatted log output for assertions.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, buffer.contents())
    }

    #[test]
    fn test_find_first_warns_on_ambiguity() {
        let registry = RouteRegistry::new()
            .post("/b", "shared")
            .get("/a", "shared")
            .get("/c", "other");

        let (entry, logs) = with_captured_logs(|| {
            registry
                .find_first(|e| *e.handler() == "shared")
                .map(RouteEntry::template)
        });
        assert_eq!(entry, Some("/a"));
        assert!(logs.contains("More than one route found"), "{logs}");
        assert!(logs.contains("GET"), "{logs}");
        assert!(logs.contains("/a"), "{logs}");
        assert!(!logs.contains("/b"), "{logs}");
    }

    #[test]
    fn test_find_first_single_match_is_silent() {
        let registry = RouteRegistry::new()
            .get("/a", "shared")
            .get("/c", "other");

        let (template, logs) =
            with_captured_logs(|| registry.find_template(|e| *e.handler() == "other"));
        assert_eq!(template, Some("/c"));
        assert!(logs.is_empty(), "{logs}");
    }

    #[test]
    fn test_config_is_kept() {
        assert!(RouteRegistry::<()>::new().config().ignore_trailing_slashes);
        let strict = RouteRegistry::<()>::with_config(RegistryConfig::strict());
        assert_eq!(*strict.config(), RegistryConfig::strict());
    }

    #[test]
    fn test_find_first_returns_first_of_many() {
        let registry = RouteRegistry::new()
            .post("/b", "shared")
            .get("/a", "shared")
            .get("/c", "other");

        let entry = registry.find_first(|e| *e.raw_handler() == "shared").unwrap();
        assert_eq!(entry.method(), Method::Get);
        assert_eq!(entry.template(), "/a");

        assert_eq!(registry.find_template(|e| *e.handler() == "other"), Some("/c"));
        assert_eq!(registry.find_template(|e| *e.handler() == "missing"), None);
    }

    #[test]
    fn test_extract_with_registry_decoder() {
        let registry = RouteRegistry::new()
            .get("/files/:name/*", "files")
            .with_decoder(|raw: &str| raw.replace("%20", "_"));

        let entry = &registry.entries(Method::Get)[0];
        let path = "/files/my%20doc/a%20b/c";
        assert_eq!(registry.extract_params(entry, path).get("name"), Some("my_doc"));
        assert_eq!(registry.extract_splats(entry, path), vec!["a_b/c"]);
    }

    #[test]
    fn test_registry_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RouteRegistry<fn()>>();
    }

    #[test]
    fn test_debug_lists_routes() {
        let registry = RouteRegistry::new().get("/a", 1);
        let debug = format!("{registry:?}");
        assert!(debug.contains("\"/a\""));
        assert!(debug.contains("Get"));
    }
}
