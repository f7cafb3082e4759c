use flat_qs::{Config, Error, QueryMap, Value};

use pretty_assertions::assert_eq;

fn qm<const N: usize>(entries: [(&str, Value); N]) -> QueryMap {
    QueryMap::from_iter(entries)
}

fn s(v: &str) -> Value {
    Value::from(v)
}

fn seq(vs: Vec<&str>) -> Value {
    Value::from(vs)
}

/// The accumulated catalogue of inputs the legacy convention assigns a
/// meaning to, wonky or not. Each entry is `(input, expected mapping)`.
fn parse_cases() -> Vec<(&'static str, QueryMap)> {
    vec![
        ("__proto__=1", qm([("__proto__", s("1"))])),
        ("__defineGetter__=asdf", qm([("__defineGetter__", s("asdf"))])),
        ("foo=918854443121279438895193", qm([("foo", s("918854443121279438895193"))])),
        ("foo=bar", qm([("foo", s("bar"))])),
        ("foo=bar&foo=quux", qm([("foo", seq(vec!["bar", "quux"]))])),
        ("foo=1&bar=2", qm([("foo", s("1")), ("bar", s("2"))])),
        (
            "my+weird+field=q1%212%22%27w%245%267%2Fz8%29%3F",
            qm([("my weird field", s("q1!2\"'w$5&7/z8)?"))]),
        ),
        ("foo%3Dbaz=bar", qm([("foo=baz", s("bar"))])),
        ("foo=baz=bar", qm([("foo", s("baz=bar"))])),
        (
            "str=foo&arr=1&arr=2&arr=3&somenull=&undef=",
            qm([
                ("str", s("foo")),
                ("arr", seq(vec!["1", "2", "3"])),
                ("somenull", s("")),
                ("undef", s("")),
            ]),
        ),
        (" foo = bar ", qm([(" foo ", s(" bar "))])),
        ("foo=%zx", qm([("foo", s("%zx"))])),
        ("foo=%EF%BF%BD", qm([("foo", s("\u{fffd}"))])),
        (
            "hasOwnProperty=x&toString=foo&valueOf=bar&__defineGetter__=baz",
            qm([
                ("hasOwnProperty", s("x")),
                ("toString", s("foo")),
                ("valueOf", s("bar")),
                ("__defineGetter__", s("baz")),
            ]),
        ),
        ("foo&bar=baz", qm([("foo", s("")), ("bar", s("baz"))])),
        ("a=b&c&d=e", qm([("a", s("b")), ("c", s("")), ("d", s("e"))])),
        ("a=b&c=&d=e", qm([("a", s("b")), ("c", s("")), ("d", s("e"))])),
        ("a=b&=c&d=e", qm([("a", s("b")), ("", s("c")), ("d", s("e"))])),
        ("a=b&=&c=d", qm([("a", s("b")), ("", s("")), ("c", s("d"))])),
        ("&&foo=bar&&", qm([("foo", s("bar"))])),
        ("&", qm([])),
        ("&&&&", qm([])),
        ("&=&", qm([("", s(""))])),
        ("&=&=", qm([("", seq(vec!["", ""]))])),
        ("=", qm([("", s(""))])),
        ("+", qm([(" ", s(""))])),
        ("+=", qm([(" ", s(""))])),
        ("+&", qm([(" ", s(""))])),
        ("=+", qm([("", s(" "))])),
        ("+=&", qm([(" ", s(""))])),
        ("a&&b", qm([("a", s("")), ("b", s(""))])),
        ("a=a&&b=b", qm([("a", s("a")), ("b", s("b"))])),
        ("&a", qm([("a", s(""))])),
        ("&=", qm([("", s(""))])),
        ("a&a&", qm([("a", seq(vec!["", ""]))])),
        ("a&a&a&", qm([("a", seq(vec!["", "", ""]))])),
        ("a&a&a&a&", qm([("a", seq(vec!["", "", "", ""]))])),
        ("a=&a=value&a=", qm([("a", seq(vec!["", "value", ""]))])),
        ("foo+bar=baz+quux", qm([("foo bar", s("baz quux"))])),
        ("+foo=+bar", qm([(" foo", s(" bar"))])),
        ("a+", qm([("a ", s(""))])),
        ("=a+", qm([("", s("a "))])),
        ("a+&", qm([("a ", s(""))])),
        ("=a+&", qm([("", s("a "))])),
        ("%20+", qm([("  ", s(""))])),
        ("=%20+", qm([("", s("  "))])),
        ("%20+&", qm([("  ", s(""))])),
        ("=%20+&", qm([("", s("  "))])),
        ("", qm([])),
    ]
}

#[test]
fn parse_catalogue() {
    for (input, expected) in parse_cases() {
        assert_eq!(flat_qs::parse(input), expected, "input: {input:?}");
    }
}

#[test]
fn parse_catalogue_with_colon_delimiters() {
    let config = Config::new().separator(";").assignment(":");
    let cases = [
        ("foo:bar", qm([("foo", s("bar"))])),
        ("foo:bar;foo:quux", qm([("foo", seq(vec!["bar", "quux"]))])),
        (
            "foo:1&bar:2;baz:quux",
            qm([("foo", s("1&bar:2")), ("baz", s("quux"))]),
        ),
        ("foo%3Abaz:bar", qm([("foo:baz", s("bar"))])),
        ("foo:baz:bar", qm([("foo", s("baz:bar"))])),
    ];
    for (input, expected) in cases {
        assert_eq!(config.parse_str(input), expected, "input: {input:?}");
    }
}

#[test]
fn parsed_map_has_no_ambient_members() {
    let map = flat_qs::parse("foo=bar");
    assert!(map.get("toString").is_none());
    assert!(map.get("hasOwnProperty").is_none());
    assert!(map.get("__proto__").is_none());
    assert_eq!(map.len(), 1);
}

#[test]
fn large_scalar_values_survive() {
    let map = flat_qs::parse("id=918854443121279438895193");
    assert_eq!(map.get("id"), Some(&s("918854443121279438895193")));
}

#[test]
fn empty_separator_takes_whole_input_as_one_token() {
    assert_eq!(
        Config::new().separator("").parse_str("a"),
        qm([("a", s(""))])
    );
}

#[test]
fn empty_assignment_puts_the_whole_token_in_the_value() {
    assert_eq!(
        Config::new().assignment("").parse_str("a"),
        qm([("", s("a"))])
    );
}

#[test]
fn separator_wins_over_equal_assignment() {
    assert_eq!(
        Config::new().separator("&").assignment("&").parse_str("foo&bar"),
        qm([("foo", s("")), ("bar", s(""))])
    );
}

#[test]
fn limiting_counts_distinct_keys() {
    let map = Config::new().max_keys(1).parse_str("a=1&b=1&c=1");
    assert_eq!(map.len(), 1);
    assert_eq!(map, qm([("a", s("1"))]));
}

#[test]
fn limiting_skips_empty_tokens() {
    let map = Config::new().max_keys(1).parse_str("&a");
    assert_eq!(map, qm([("a", s(""))]));
}

#[test]
fn limiting_lets_appends_through() {
    let map = Config::new().max_keys(1).parse_str("a=1&a=2&b=3");
    assert_eq!(map, qm([("a", seq(vec!["1", "2"]))]));
}

#[test]
fn removing_the_limit() {
    let input = (0..2000)
        .map(|i| format!("{i}={i}"))
        .collect::<Vec<_>>()
        .join("&");
    let map = Config::new().max_keys(0).parse_str(&input);
    assert_eq!(map.len(), 2000);
}

#[test]
fn custom_decode_hook_replaces_the_decoder() {
    let double = |raw: &[u8]| -> flat_qs::Result<String> {
        let text = String::from_utf8_lossy(raw);
        Ok(format!("{text}{text}"))
    };
    let map = Config::new()
        .decode_with(&double)
        .parse_str("a=a&b=b&c=c");
    assert_eq!(
        map,
        qm([("aa", s("aa")), ("bb", s("bb")), ("cc", s("cc"))])
    );
}

#[test]
fn custom_decode_hook_with_multichar_assignment() {
    let identity = |raw: &[u8]| -> flat_qs::Result<String> {
        Ok(String::from_utf8_lossy(raw).into_owned())
    };
    let map = Config::new()
        .assignment("==")
        .decode_with(&identity)
        .parse_str("a=a&b=b&c=c");
    assert_eq!(
        map,
        qm([("a=a", s("")), ("b=b", s("")), ("c=c", s(""))])
    );
}

#[test]
fn throwing_decode_hook_recovers_per_token() {
    let broken = |_: &[u8]| -> flat_qs::Result<String> { Err(Error::hook("jump to the catch")) };
    let map = Config::new().decode_with(&broken).parse_str("a=a");
    assert_eq!(map, qm([("a", s("a"))]));
}

#[test]
fn rewriting_decode_hook_touches_every_token() {
    // stands in for the original's swappable unescape binding
    let underscores = |raw: &[u8]| -> flat_qs::Result<String> {
        Ok(String::from_utf8_lossy(raw).replace('o', "_"))
    };
    let map = Config::new().decode_with(&underscores).parse_str("foo=bor");
    assert_eq!(map, qm([("f__", s("b_r"))]));
}

#[test]
fn invalid_encoded_multibyte_passes_through() {
    let map = flat_qs::parse("%\u{100}=%\u{101}");
    assert_eq!(map, qm([("%\u{100}", s("%\u{101}"))]));
}

#[test]
fn parse_bytes_replaces_invalid_utf8() {
    let map = flat_qs::parse_bytes(b"key=\xd3\xf2");
    assert_eq!(map, qm([("key", s("\u{fffd}\u{fffd}"))]));
}
