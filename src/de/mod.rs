//! Parsing of querystrings into an ordered mapping.

pub(crate) mod decode;

use crate::Config;
use crate::map::QueryMap;

/// Parses a querystring with the default configuration (`&` separator, `=`
/// assignment, 1000-key cap).
///
/// Parsing never fails. Zero-length tokens are skipped, so stray
/// separators collapse silently; repeated keys promote to sequences; `+`
/// decodes to space in both keys and values.
///
/// ```
/// use flat_qs::{QueryMap, Value};
///
/// let map = flat_qs::parse("foo=bar&abc=xyz&abc=123");
/// assert_eq!(
///     map,
///     QueryMap::from_iter([
///         ("foo", Value::from("bar")),
///         ("abc", Value::from(vec!["xyz", "123"])),
///     ])
/// );
/// ```
pub fn parse(input: &str) -> QueryMap {
    Config::new().parse_str(input)
}

/// Parses a querystring from raw bytes with the default configuration.
///
/// Byte sequences that do not decode to valid UTF-8 become U+FFFD
/// replacement characters in the resulting keys and values.
pub fn parse_bytes(input: &[u8]) -> QueryMap {
    Config::new().parse_bytes(input)
}

/// Splits a querystring into tokens and inserts them into a [`QueryMap`].
///
/// Tokens are produced by substring search for the separator; the
/// assignment substring is then located within each token. All decoding is
/// deferred to [`decode::unescape_bytes`] or the configured hook, so the
/// tokenizer itself only ever slices the input.
pub(crate) struct Parser<'qs, 'a> {
    input: &'qs [u8],
    config: Config<'a>,
}

impl<'qs, 'a> Parser<'qs, 'a> {
    pub(crate) fn new(input: &'qs [u8], config: Config<'a>) -> Self {
        Parser { input, config }
    }

    pub(crate) fn parse(self) -> QueryMap {
        let mut map = QueryMap::new();
        if self.input.is_empty() {
            return map;
        }

        let assignment = self.config.assignment.as_bytes();
        for token in split_tokens(self.input, self.config.separator.as_bytes()) {
            if token.is_empty() {
                // leading, trailing and doubled separators collapse
                continue;
            }

            let (raw_key, raw_value) = match find_subslice(token, assignment) {
                Some(at) => (&token[..at], &token[at + assignment.len()..]),
                None => (token, &[][..]),
            };

            let key = self.decode_token(raw_key);
            if !map.contains_key(&key) && self.at_capacity(map.len()) {
                // the cap only gates tokens that would insert a new key;
                // once one is rejected, the rest of the input is ignored
                break;
            }
            let value = self.decode_token(raw_value);
            map.append(key, value);
        }

        #[cfg(feature = "debug_parsed")]
        tracing::debug!(?map, "parsed querystring");

        map
    }

    fn at_capacity(&self, distinct_keys: usize) -> bool {
        self.config.max_keys > 0 && distinct_keys >= self.config.max_keys
    }

    fn decode_token(&self, raw: &[u8]) -> String {
        match self.config.decode {
            Some(hook) => match hook(raw) {
                Ok(decoded) => decoded,
                // a failing hook falls back to the raw token
                Err(_) => String::from_utf8_lossy(raw).into_owned(),
            },
            None => match decode::unescape_bytes(raw, true) {
                std::borrow::Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes).into_owned(),
                std::borrow::Cow::Owned(bytes) => match String::from_utf8(bytes) {
                    Ok(s) => s,
                    Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
                },
            },
        }
    }
}

/// Iterator over `input` split on the full `separator` substring.
///
/// An empty separator yields the whole input as a single token.
fn split_tokens<'qs>(input: &'qs [u8], separator: &'qs [u8]) -> Tokens<'qs> {
    Tokens {
        rest: Some(input),
        separator,
    }
}

struct Tokens<'qs> {
    rest: Option<&'qs [u8]>,
    separator: &'qs [u8],
}

impl<'qs> Iterator for Tokens<'qs> {
    type Item = &'qs [u8];

    fn next(&mut self) -> Option<&'qs [u8]> {
        let rest = self.rest?;
        if self.separator.is_empty() {
            self.rest = None;
            return Some(rest);
        }
        match find_subslice(rest, self.separator) {
            Some(at) => {
                self.rest = Some(&rest[at + self.separator.len()..]);
                Some(&rest[..at])
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }
}

/// First occurrence of `needle` in `haystack`. An empty needle matches at
/// position zero, which is what gives an empty assignment string its
/// everything-is-the-value behavior.
fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    match needle.len() {
        0 => Some(0),
        1 => haystack.iter().position(|&b| b == needle[0]),
        n => haystack.windows(n).position(|window| window == needle),
    }
}
