//! The ordered mapping produced by [`parse`](crate::parse) and consumed by
//! [`stringify`](crate::stringify).

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single querystring value.
///
/// `parse` only ever produces `Str` and `Seq`-of-`Str` values. The remaining
/// variants exist for `stringify` callers holding loosely typed data; each
/// coerces to text by a fixed rule before encoding:
///
/// - `Int` and finite `Float` print as their canonical decimal text
///   (`±0.0` prints as `"0"`)
/// - `Bool` prints as `true`/`false`
/// - `Null`, non-finite floats, and sequences nested inside sequences all
///   coerce to the empty string
/// - `Bytes` skips coercion and goes to the percent-encoder as raw bytes;
///   this is the carrier for text that is not valid UTF-8
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    Bytes(Vec<u8>),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Seq(Vec<Value>),
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(seq: Vec<Value>) -> Self {
        Value::Seq(seq)
    }
}

impl From<Vec<&str>> for Value {
    fn from(seq: Vec<&str>) -> Self {
        Value::Seq(seq.into_iter().map(Value::from).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(seq: Vec<String>) -> Self {
        Value::Seq(seq.into_iter().map(Value::from).collect())
    }
}

/// An ordered association from string keys to [`Value`]s.
///
/// Keys preserve first-seen order, which is the order `stringify` walks
/// them in. Lookups resolve only keys that were explicitly inserted; there
/// are no ambient members, so `map.get("toString")` on a freshly parsed
/// map is `None` unless the input actually contained that key.
///
/// ```
/// let map = flat_qs::parse("foo=bar&foo=quux&abc=1");
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["foo", "abc"]);
/// assert!(map.get("hasOwnProperty").is_none());
/// ```
#[derive(Clone, Default)]
pub struct QueryMap {
    inner: IndexMap<String, Value>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Inserts `value` under `key`, replacing any existing value.
    ///
    /// A replaced key keeps its original position in the iteration order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.inner.insert(key.into(), value.into())
    }

    /// Inserts `value` under `key` with repeated-key promotion.
    ///
    /// A new key holds the value as a scalar. The second occurrence of a key
    /// converts the entry into a two-element sequence; later occurrences
    /// push onto it. This is the rule `parse` applies per token.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        match self.inner.entry(key.into()) {
            Entry::Occupied(mut occupied) => match occupied.get_mut() {
                Value::Seq(seq) => seq.push(value.into()),
                existing => {
                    let first = std::mem::replace(existing, Value::Null);
                    *existing = Value::Seq(vec![first, value.into()]);
                }
            },
            Entry::Vacant(vacant) => {
                vacant.insert(value.into());
            }
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }
}

/// Order-sensitive equality: two maps with the same entries in a different
/// insertion order are not equal, since the order round-trips through
/// `stringify`.
impl PartialEq for QueryMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl fmt::Debug for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryMap
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
            Value::Seq(seq) => {
                let mut out = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    out.serialize_element(element)?;
                }
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a querystring value")
            }

            fn visit_bool<E>(self, v: bool) -> Result<Value, E> {
                Ok(Value::Bool(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Value, E> {
                Ok(Value::Int(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Value, E> {
                // values past i64::MAX fall back to a float
                match i64::try_from(v) {
                    Ok(i) => Ok(Value::Int(i)),
                    Err(_) => Ok(Value::Float(v as f64)),
                }
            }

            fn visit_f64<E>(self, v: f64) -> Result<Value, E> {
                Ok(Value::Float(v))
            }

            fn visit_str<E>(self, v: &str) -> Result<Value, E> {
                Ok(Value::Str(v.to_owned()))
            }

            fn visit_string<E>(self, v: String) -> Result<Value, E> {
                Ok(Value::Str(v))
            }

            fn visit_bytes<E>(self, v: &[u8]) -> Result<Value, E> {
                Ok(Value::Bytes(v.to_vec()))
            }

            fn visit_byte_buf<E>(self, v: Vec<u8>) -> Result<Value, E> {
                Ok(Value::Bytes(v))
            }

            fn visit_unit<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
                Value::deserialize(deserializer)
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
                let mut seq = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(element) = access.next_element()? {
                    seq.push(element);
                }
                Ok(Value::Seq(seq))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Serialize for QueryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}

impl<'de> Deserialize<'de> for QueryMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = QueryMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of querystring values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<QueryMap, A::Error> {
                let mut map = QueryMap::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, Value>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
