//! Flat querystring parsing and serialization
//!
//! This library converts between an ordered flat key/value mapping and the
//! legacy `application/x-www-form-urlencoded`-like encoding used in web
//! URLs, reproducing the historical edge-case behavior of that convention:
//! tolerant percent-decoding, `+`-as-space on the decode side only,
//! repeated-key promotion into ordered sequences, and fixed coercion rules
//! for loosely typed values.
//!
//! There is deliberately no support for nested bracket syntax
//! (`a[b][c]=1`); for that, reach for a nested-querystring crate. This one
//! targets callers that need to read and write plain query components
//! without pulling in a full URL parser.
//!
//! ## Usage
//!
//! ```
//! use flat_qs::{QueryMap, Value};
//!
//! let map = flat_qs::parse("foo=bar&abc=xyz&abc=123");
//! assert_eq!(
//!     map,
//!     QueryMap::from_iter([
//!         ("foo", Value::from("bar")),
//!         ("abc", Value::from(vec!["xyz", "123"])),
//!     ])
//! );
//!
//! let out = flat_qs::stringify(&map).unwrap();
//! assert_eq!(out, "foo=bar&abc=xyz&abc=123");
//! ```
//!
//! Separator, assignment, key cap, and the percent-codec itself are all
//! configurable through [`Config`]:
//!
//! ```
//! use flat_qs::Config;
//!
//! let map = Config::new()
//!     .separator(";")
//!     .assignment(":")
//!     .parse_str("foo:bar;baz:qux");
//! assert_eq!(
//!     Config::new().separator(";").assignment(":").stringify(&map).unwrap(),
//!     "foo:bar;baz:qux"
//! );
//! ```
//!
//! The tolerant percent-codec is exposed on its own as [`unescape`],
//! [`unescape_bytes`], [`escape`], and [`escape_bytes`]. Decoding is total:
//! malformed escapes are copied through unchanged and invalid UTF-8 decodes
//! to replacement characters. Encoding fails only on an unpaired UTF-16
//! surrogate (reaching the encoder as WTF-8 bytes), which is also the only
//! error [`stringify`] can raise with the built-in encoder.

mod config;
mod de;
mod error;
mod map;
mod ser;

#[doc(inline)]
pub use config::{Config, DecodeFn, EncodeFn};
#[doc(inline)]
pub use de::decode::{unescape, unescape_bytes};
#[doc(inline)]
pub use de::{parse, parse_bytes};
#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use map::{QueryMap, Value};
#[doc(inline)]
pub use ser::encode::{escape, escape_bytes};
#[doc(inline)]
pub use ser::stringify;
