//! Serialization of an ordered mapping into a querystring.

pub(crate) mod encode;

use std::borrow::Cow;

use crate::Config;
use crate::error::Result;
use crate::map::{QueryMap, Value};

/// Serializes a mapping with the default configuration (`&` separator, `=`
/// assignment, built-in percent-encoder).
///
/// Keys are emitted in insertion order; a sequence value emits one token
/// per element, and an empty sequence emits nothing at all. Values are
/// coerced to text by the fixed rule on [`Value`] before encoding.
///
/// Fails only when a value contains an unpaired surrogate or a
/// caller-supplied encode hook fails; both abort the whole call.
///
/// ```
/// use flat_qs::QueryMap;
///
/// let map = QueryMap::from_iter([
///     ("foo", "bar"),
///     ("baz", "qux"),
/// ]);
/// assert_eq!(flat_qs::stringify(&map).unwrap(), "foo=bar&baz=qux");
/// ```
pub fn stringify(map: &QueryMap) -> Result<String> {
    Config::new().stringify(map)
}

pub(crate) struct Serializer<'a> {
    out: String,
    first_kv: bool,
    config: Config<'a>,
}

impl<'a> Serializer<'a> {
    pub(crate) fn new(config: Config<'a>) -> Self {
        Self {
            // same starting guess as the parser side: most querystrings
            // fit well under this
            out: String::with_capacity(128),
            first_kv: true,
            config,
        }
    }

    pub(crate) fn serialize(mut self, map: &QueryMap) -> Result<String> {
        for (key, value) in map.iter() {
            match value {
                // each element becomes its own token; an empty sequence
                // contributes nothing, not even an empty token
                Value::Seq(elements) => {
                    for element in elements {
                        self.write_pair(key, element)?;
                    }
                }
                scalar => self.write_pair(key, scalar)?,
            }
        }
        Ok(self.out)
    }

    fn write_pair(&mut self, key: &str, value: &Value) -> Result<()> {
        let encoded_key = self.encode_bytes(key.as_bytes())?;
        let encoded_value = self.encode_bytes(&coerce(value))?;

        if self.first_kv {
            self.first_kv = false;
        } else {
            self.out.push_str(self.config.separator);
        }
        self.out.push_str(&encoded_key);
        self.out.push_str(self.config.assignment);
        self.out.push_str(&encoded_value);
        Ok(())
    }

    fn encode_bytes(&self, bytes: &[u8]) -> Result<String> {
        match self.config.encode {
            // hook failures propagate, unlike the decode side
            Some(hook) => hook(bytes),
            None => encode::escape_bytes(bytes),
        }
    }
}

/// The coercion-to-string rule applied to every value before encoding.
///
/// Strings pass through; integers and finite floats print as canonical
/// decimal text with `±0.0` collapsing to `"0"`; booleans print as
/// `true`/`false`; everything without a textual form (null, NaN,
/// infinities, sequences nested inside sequences) becomes the empty
/// string. Raw bytes skip coercion entirely.
fn coerce(value: &Value) -> Cow<'_, [u8]> {
    match value {
        Value::Str(s) => Cow::Borrowed(s.as_bytes()),
        Value::Bytes(b) => Cow::Borrowed(b.as_slice()),
        Value::Int(i) => Cow::Owned(itoa::Buffer::new().format(*i).as_bytes().to_vec()),
        Value::Float(f) => coerce_float(*f),
        Value::Bool(true) => Cow::Borrowed(b"true"),
        Value::Bool(false) => Cow::Borrowed(b"false"),
        Value::Null | Value::Seq(_) => Cow::Borrowed(b""),
    }
}

fn coerce_float(f: f64) -> Cow<'static, [u8]> {
    if !f.is_finite() {
        return Cow::Borrowed(b"");
    }
    if f == 0.0 {
        // covers negative zero, which would otherwise print a sign
        return Cow::Borrowed(b"0");
    }
    Cow::Owned(ryu::Buffer::new().format_finite(f).as_bytes().to_vec())
}
