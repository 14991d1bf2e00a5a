//! Route template compilation.

use regex::Regex;
use tracing::warn;

use crate::decode::{PercentDecoder, UrlDecode};
use crate::error::RouterError;
use crate::matcher;
use crate::params::PathParams;

/// A token in a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    /// Text that must appear as is.
    Literal(&'a str),
    /// A `:name` parameter, matching one path segment.
    Param(&'a str),
    /// A `*` splat, matching any run of characters.
    Splat,
}

/// Which wildcards an extraction pattern captures.
#[derive(Debug, Clone, Copy)]
enum Capture {
    Params,
    Splats,
}

/// A compiled route template.
///
/// Built once per registered route and never modified afterwards. Holds the
/// raw template for the boolean matcher plus two regexes used to pull
/// parameter and splat values out of a path that is already known to match.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    /// The original template string.
    template: String,
    /// Parameter names in template order, as written.
    param_names: Vec<String>,
    /// Captures one group per parameter.
    param_regex: Option<Regex>,
    /// Captures one group per splat.
    splat_regex: Option<Regex>,
}

impl CompiledRoute {
    /// Compiles a route template.
    ///
    /// Template syntax:
    /// - `/users` - Literal path
    /// - `/users/:id` - Path with parameter
    /// - `/files/*` - Splat (matches any number of segments)
    ///
    /// Compilation never fails. A template the extraction regexes cannot
    /// express still matches through [`matches`](Self::matches), but
    /// extraction on it returns nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use oxide_routing::CompiledRoute;
    ///
    /// let route = CompiledRoute::new("/posts/:id/comments/:comment_id");
    /// assert!(route.matches("/posts/123/comments/456"));
    ///
    /// let params = route.extract_params("/posts/123/comments/456");
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// ```
    pub fn new(template: &str) -> Self {
        let tokens = tokenize(template);
        let param_names = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Param(name) => Some((*name).to_string()),
                _ => None,
            })
            .collect();

        Self {
            template: template.to_string(),
            param_names,
            param_regex: compile(template, &tokens, Capture::Params),
            splat_regex: compile(template, &tokens, Capture::Splats),
        }
    }

    /// Returns the original template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the parameter names, in template order and as written.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// Returns true if `path` matches this template.
    pub fn matches(&self, path: &str) -> bool {
        matcher::matches(&self.template, path)
    }

    /// Extracts parameters, percent-decoding the values.
    pub fn extract_params(&self, path: &str) -> PathParams {
        self.extract_params_with(path, &PercentDecoder)
    }

    /// Extracts parameters with the given decoder.
    ///
    /// Keys are the lowercased parameter names. When a name occurs more than
    /// once the last occurrence wins. Returns empty params if `path` does not
    /// match.
    pub fn extract_params_with(&self, path: &str, decoder: &dyn UrlDecode) -> PathParams {
        let Some(values) = captures(self.param_regex.as_ref(), path) else {
            return PathParams::new();
        };
        self.param_names
            .iter()
            .zip(values)
            .map(|(name, value)| (name.to_lowercase(), decoder.decode(value)))
            .collect()
    }

    /// Extracts splat values in template order, percent-decoded.
    pub fn extract_splats(&self, path: &str) -> Vec<String> {
        self.extract_splats_with(path, &PercentDecoder)
    }

    /// Extracts splat values with the given decoder.
    ///
    /// Returns an empty list if `path` does not match.
    pub fn extract_splats_with(&self, path: &str, decoder: &dyn UrlDecode) -> Vec<String> {
        captures(self.splat_regex.as_ref(), path)
            .map(|values| values.into_iter().map(|v| decoder.decode(v)).collect())
            .unwrap_or_default()
    }
}

/// Returns the captured groups of an anchored regex, in order.
fn captures<'p>(regex: Option<&Regex>, path: &'p str) -> Option<Vec<&'p str>> {
    let caps = regex?.captures(path)?;
    Some(
        caps.iter()
            .skip(1)
            .map(|m| m.map_or("", |m| m.as_str()))
            .collect(),
    )
}

/// Splits a template into literal, parameter and splat tokens.
///
/// A parameter runs from `:` up to the next `/`, so `:` only ever opens a
/// parameter and `*` inside a parameter name is part of the name.
fn tokenize(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = template;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('*') {
            tokens.push(Token::Splat);
            rest = after;
        } else if let Some(after) = rest.strip_prefix(':') {
            let end = after.find('/').unwrap_or(after.len());
            tokens.push(Token::Param(&after[..end]));
            rest = &after[end..];
        } else {
            let end = rest.find([':', '*']).unwrap_or(rest.len());
            tokens.push(Token::Literal(&rest[..end]));
            rest = &rest[end..];
        }
    }

    tokens
}

/// Builds the anchored extraction regex for a template.
///
/// Parameters become `[^/]*?`, splats `.*?`; one of the two kinds is wrapped
/// in capture groups. Doubled separators collapse into one, a trailing
/// separator becomes optional and literal text is escaped. `.` also matches
/// newlines, like a splat does in the boolean matcher.
fn pattern(tokens: &[Token<'_>], capture: Capture) -> String {
    let mut body = String::new();

    for token in tokens {
        match (token, capture) {
            (Token::Literal(text), _) => {
                let mut collapsed = String::with_capacity(text.len());
                for c in text.chars() {
                    if !(c == '/' && collapsed.ends_with('/')) {
                        collapsed.push(c);
                    }
                }
                body.push_str(&regex::escape(&collapsed));
            }
            (Token::Param(_), Capture::Params) => body.push_str("([^/]*?)"),
            (Token::Param(_), Capture::Splats) => body.push_str("[^/]*?"),
            (Token::Splat, Capture::Splats) => body.push_str("(.*?)"),
            (Token::Splat, Capture::Params) => body.push_str(".*?"),
        }
    }

    let trimmed = body.strip_suffix('/').unwrap_or(&body);
    format!("(?s)^{trimmed}/?$")
}

fn compile(template: &str, tokens: &[Token<'_>], capture: Capture) -> Option<Regex> {
    let pattern = pattern(tokens, capture);
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            let err = RouterError::InvalidPattern {
                template: template.to_string(),
                message: e.to_string(),
            };
            warn!(%template, %pattern, error = %err, "Extraction disabled for route");
            None
        }
    }
}
