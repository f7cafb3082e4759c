use std::fmt;

use crate::error::Result;
use crate::map::QueryMap;

/// Decoder applied to each raw key and value token during parsing.
///
/// The hook receives the undecoded token bytes (percent-escapes and `+`
/// intact). A failing hook is caught at the token level: the raw token is
/// used as-is and parsing continues.
pub type DecodeFn = dyn Fn(&[u8]) -> Result<String>;

/// Encoder applied to each coerced key and value during stringification.
///
/// A failing hook aborts the whole `stringify` call.
pub type EncodeFn = dyn Fn(&[u8]) -> Result<String>;

/// Configuration for parsing and stringification behavior.
///
/// Immutable per call and freely copyable; the library holds no
/// process-wide state.
///
/// ## Separator and assignment
///
/// Both are matched as plain substrings and may be any short string. An
/// empty separator disables splitting entirely, so the whole input becomes
/// a single token:
///
/// ```
/// use flat_qs::{Config, QueryMap};
///
/// let map = Config::new()
///     .separator(";")
///     .assignment(":")
///     .parse_str("foo:bar;baz:qux");
/// assert_eq!(map, QueryMap::from_iter([("foo", "bar"), ("baz", "qux")]));
///
/// let map = Config::new().separator("").parse_str("a=b&c=d");
/// assert_eq!(map, QueryMap::from_iter([("a", "b&c=d")]));
/// ```
///
/// ## Key cap
///
/// `max_keys` bounds the number of distinct keys accepted during parsing
/// (default 1000, `0` means unlimited). Tokens that append to an
/// already-present key never count against the cap; the first token that
/// would exceed it stops the parse.
#[derive(Clone, Copy)]
pub struct Config<'a> {
    pub(crate) separator: &'a str,
    pub(crate) assignment: &'a str,
    pub(crate) max_keys: usize,
    pub(crate) decode: Option<&'a DecodeFn>,
    pub(crate) encode: Option<&'a EncodeFn>,
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Config<'a> {
    pub const fn new() -> Self {
        Self {
            separator: "&",
            assignment: "=",
            max_keys: 1000,
            decode: None,
            encode: None,
        }
    }

    /// Sets the substring that separates key/value tokens. Default `"&"`.
    pub const fn separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the substring that separates a key from its value within a
    /// token. Default `"="`.
    pub const fn assignment(mut self, assignment: &'a str) -> Self {
        self.assignment = assignment;
        self
    }

    /// Caps the number of distinct keys accepted by `parse`. Default 1000;
    /// `0` removes the cap.
    pub const fn max_keys(mut self, max_keys: usize) -> Self {
        self.max_keys = max_keys;
        self
    }

    /// Overrides the percent-decoder used for keys and values during
    /// parsing.
    pub fn decode_with(mut self, decode: &'a DecodeFn) -> Self {
        self.decode = Some(decode);
        self
    }

    /// Overrides the percent-encoder used for keys and values during
    /// stringification.
    pub fn encode_with(mut self, encode: &'a EncodeFn) -> Self {
        self.encode = Some(encode);
        self
    }

    /// Parses a querystring from a `&str` using this `Config`.
    pub fn parse_str(self, input: &str) -> QueryMap {
        self.parse_bytes(input.as_bytes())
    }

    /// Parses a querystring from a `&[u8]` using this `Config`.
    pub fn parse_bytes(self, input: &[u8]) -> QueryMap {
        crate::de::Parser::new(input, self).parse()
    }

    /// Serializes a mapping to a querystring using this `Config`.
    pub fn stringify(self, map: &QueryMap) -> Result<String> {
        crate::ser::Serializer::new(self).serialize(map)
    }
}

impl fmt::Debug for Config<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("separator", &self.separator)
            .field("assignment", &self.assignment)
            .field("max_keys", &self.max_keys)
            .field("decode", &self.decode.map(|_| "<fn>"))
            .field("encode", &self.encode.map(|_| "<fn>"))
            .finish()
    }
}
