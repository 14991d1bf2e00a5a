//! URL decoding of extracted values.

use std::borrow::Cow;

/// Decodes a raw value captured from a request path.
///
/// Called once per extracted parameter or splat value.
pub trait UrlDecode: Send + Sync {
    /// Returns the decoded form of `raw`.
    fn decode(&self, raw: &str) -> String;
}

impl<F> UrlDecode for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn decode(&self, raw: &str) -> String {
        self(raw)
    }
}

/// Percent-decoding as used for path segments.
///
/// `+` is left alone (it only means a space in form bodies and query
/// strings). Sequences that do not decode to valid UTF-8 are returned
/// undecoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentDecoder;

impl UrlDecode for PercentDecoder {
    fn decode(&self, raw: &str) -> String {
        if !raw.contains('%') {
            return raw.to_string();
        }
        urlencoding::decode(raw)
            .unwrap_or(Cow::Borrowed(raw))
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_decoding() {
        let d = PercentDecoder;
        assert_eq!(d.decode("hello%20world"), "hello world");
        assert_eq!(d.decode("caf%C3%A9"), "café");
        assert_eq!(d.decode("plain"), "plain");
    }

    #[test]
    fn test_plus_is_kept() {
        assert_eq!(PercentDecoder.decode("a+b"), "a+b");
        assert_eq!(PercentDecoder.decode("a%2Bb"), "a+b");
    }

    #[test]
    fn test_invalid_utf8_left_undecoded() {
        assert_eq!(PercentDecoder.decode("%FF%FE"), "%FF%FE");
    }

    #[test]
    fn test_closure_decoder() {
        let upper = |raw: &str| raw.to_uppercase();
        assert_eq!(upper.decode("abc"), "ABC");
    }
}
