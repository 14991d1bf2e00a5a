//! Registry configuration.

use serde::{Deserialize, Serialize};

/// Options controlling how a [`RouteRegistry`](crate::RouteRegistry) matches
/// paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// When true (the default), `/hello` and `/hello/` are the same path.
    /// When false, a template and a path that disagree on having a trailing
    /// slash never match.
    pub ignore_trailing_slashes: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            ignore_trailing_slashes: true,
        }
    }
}

impl RegistryConfig {
    /// Configuration that treats trailing slashes as significant.
    pub fn strict() -> Self {
        Self {
            ignore_trailing_slashes: false,
        }
    }
}
