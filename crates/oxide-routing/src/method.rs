//! Request methods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::RouterError;

/// Methods a route can be registered under.
///
/// Besides the HTTP verbs this includes the `Before` and `After` filter
/// pseudo-methods, which the host framework runs around the endpoint
/// handlers. Declaration order is the order in which
/// [`RouteRegistry::find_first`](crate::RouteRegistry::find_first) visits
/// methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
    /// HEAD method
    Head,
    /// TRACE method
    Trace,
    /// CONNECT method
    Connect,
    /// OPTIONS method
    Options,
    /// Filter run before the endpoint handlers.
    Before,
    /// Filter run after the endpoint handlers.
    After,
}

impl Method {
    /// Every method, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Patch,
        Self::Delete,
        Self::Head,
        Self::Trace,
        Self::Connect,
        Self::Options,
        Self::Before,
        Self::After,
    ];

    /// Returns the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Trace => "TRACE",
            Self::Connect => "CONNECT",
            Self::Options => "OPTIONS",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
        }
    }

    /// Whether this is a real HTTP verb rather than a filter pseudo-method.
    pub fn is_http(&self) -> bool {
        !matches!(self, Self::Before | Self::After)
    }
}

impl FromStr for Method {
    type Err = RouterError;

    /// Parses a method name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RouterError::InvalidMethod(s.to_string()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Method {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
