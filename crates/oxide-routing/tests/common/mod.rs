#![allow(dead_code)]

use oxide_routing::{CompiledRoute, Method, RegistryConfig, RouteRegistry};

pub fn route(template: &str) -> CompiledRoute {
    CompiledRoute::new(template)
}

pub fn assert_matches(template: &str, path: &str) {
    assert!(
        route(template).matches(path),
        "expected {template} to match {path}"
    );
}

pub fn assert_no_match(template: &str, path: &str) {
    assert!(
        !route(template).matches(path),
        "expected {template} not to match {path}"
    );
}

/// Builds a registry labelling each route with its template.
pub fn registry(config: RegistryConfig, routes: &[(Method, &str)]) -> RouteRegistry<String> {
    let mut registry = RouteRegistry::with_config(config);
    for (method, template) in routes {
        registry.register(*method, template, template.to_string(), template.to_string());
    }
    registry
}

pub fn candidates(registry: &RouteRegistry<String>, method: Method, path: &str) -> Vec<String> {
    registry
        .find_candidates(method, path)
        .into_iter()
        .map(|e| e.template().to_string())
        .collect()
}
