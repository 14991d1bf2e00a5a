//! # oxide-routing
//!
//! Route template matching for HTTP dispatch.
//!
//! This crate provides:
//! - Route templates with parameters (`:id`) and splats (`*`)
//! - A non-allocating boolean matcher that runs on every request
//! - Parameter and splat extraction for routes that matched
//! - A per-method route registry that keeps registration order as priority
//! - Reverse lookup of the route a handler is registered under
//!
//! Handlers are opaque: the registry stores whatever the host framework
//! gives it and never calls it.
//!
//! ## Quick Start
//!
//! ```
//! use oxide_routing::{Method, RouteRegistry};
//!
//! let registry = RouteRegistry::new()
//!     .before("*", "log_request")
//!     .get("/users/:id", "show_user")
//!     .get("/files/*", "serve_file");
//!
//! let candidates = registry.find_candidates(Method::Get, "/users/42");
//! assert_eq!(candidates.len(), 1);
//! assert_eq!(*candidates[0].handler(), "show_user");
//!
//! let params = registry.extract_params(candidates[0], "/users/42");
//! assert_eq!(params.get("id"), Some("42"));
//! ```
//!
//! ## Templates
//!
//! - `/users` matches only `/users` (and `/users/` unless trailing slashes
//!   are strict)
//! - `/users/:id` matches one segment in place of `:id`, possibly empty
//! - `/files/*` matches anything after `/files/`, across segments
//! - `/a/*/b/*/c` may contain several splats; ambiguous placements resolve by
//!   backtracking
//!
//! Parameter names are lowercased on extraction and every extracted value is
//! percent-decoded.
//!
//! ```
//! use oxide_routing::CompiledRoute;
//!
//! let route = CompiledRoute::new("/a/*/b/*/c");
//! assert!(route.matches("/a/1/b/2/c"));
//! assert_eq!(route.extract_splats("/a/1/b/2/c"), vec!["1", "2"]);
//! ```
//!
//! ## Trailing Slashes
//!
//! ```
//! use oxide_routing::{Method, RegistryConfig, RouteRegistry};
//!
//! let strict = RouteRegistry::with_config(RegistryConfig::strict()).get("/hello", ());
//! assert!(strict.find_candidates(Method::Get, "/hello/").is_empty());
//! ```

mod config;
mod decode;
mod entry;
mod error;
pub mod matcher;
mod method;
mod params;
mod path;
mod registry;
pub mod table;

pub use config::RegistryConfig;
pub use decode::{PercentDecoder, UrlDecode};
pub use entry::RouteEntry;
pub use error::{Result, RouterError};
pub use method::Method;
pub use params::PathParams;
pub use path::CompiledRoute;
pub use registry::RouteRegistry;
pub use table::{RouteSpec, RouteTable};
