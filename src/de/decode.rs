use std::borrow::Cow;

#[inline(always)]
fn hex_digit(b: u8) -> Option<u8> {
    char::from(b).to_digit(16).map(|d| d as u8)
}

/// Percent-decodes `input` to raw bytes.
///
/// This decoder is total: a `%` that is not followed by two hexadecimal
/// digits is copied through unchanged, together with whatever did follow it
/// (`%` at end of input, `%z...`, `%2g`, ...). A valid `%XX` sequence
/// decodes to the corresponding byte. When `plus_as_space` is set, an
/// unescaped `+` decodes to a space; otherwise it passes through.
///
/// Returns a borrowed slice when the input contains nothing to decode.
///
/// ```
/// use flat_qs::unescape_bytes;
///
/// assert_eq!(&*unescape_bytes(b"a%20b", false), b"a b");
/// assert_eq!(&*unescape_bytes(b"a%2gb", false), b"a%2gb");
/// assert_eq!(&*unescape_bytes(b"a+b", true), b"a b");
/// assert_eq!(&*unescape_bytes(b"a+b", false), b"a+b");
/// ```
pub fn unescape_bytes(input: &[u8], plus_as_space: bool) -> Cow<'_, [u8]> {
    if !input
        .iter()
        .any(|&b| b == b'%' || (plus_as_space && b == b'+'))
    {
        return Cow::Borrowed(input);
    }

    let mut decoded = Vec::with_capacity(input.len());
    let mut last_segment = 0;
    let mut idx = 0;

    while idx < input.len() {
        match input[idx] {
            b'+' if plus_as_space => {
                decoded.extend_from_slice(&input[last_segment..idx]);
                decoded.push(b' ');
                idx += 1;
                last_segment = idx;
            }
            b'%' => {
                // only a '%' with two hex digits after it is an escape;
                // anything else falls through and is copied verbatim
                let hex = input
                    .get(idx + 1)
                    .copied()
                    .and_then(hex_digit)
                    .zip(input.get(idx + 2).copied().and_then(hex_digit));
                match hex {
                    Some((high, low)) => {
                        decoded.extend_from_slice(&input[last_segment..idx]);
                        decoded.push(high * 0x10 + low);
                        idx += 3;
                        last_segment = idx;
                    }
                    None => idx += 1,
                }
            }
            _ => idx += 1,
        }
    }

    decoded.extend_from_slice(&input[last_segment..]);
    Cow::Owned(decoded)
}

/// Percent-decodes `input` to text.
///
/// Decoded bytes are interpreted as UTF-8; byte sequences that do not form
/// valid UTF-8 become U+FFFD replacement characters. Like
/// [`unescape_bytes`], this never fails.
///
/// ```
/// use flat_qs::unescape;
///
/// assert_eq!(unescape("1%2B1%20%3D%202", false), "1+1 = 2");
/// assert_eq!(unescape("%EF%BF%BD", false), "\u{fffd}");
/// assert_eq!(unescape("%fe", false), "\u{fffd}");
/// ```
pub fn unescape(input: &str, plus_as_space: bool) -> Cow<'_, str> {
    match unescape_bytes(input.as_bytes(), plus_as_space) {
        // nothing was decoded, so the input string is unchanged
        Cow::Borrowed(_) => Cow::Borrowed(input),
        Cow::Owned(bytes) => match String::from_utf8(bytes) {
            Ok(s) => Cow::Owned(s),
            Err(err) => Cow::Owned(String::from_utf8_lossy(err.as_bytes()).into_owned()),
        },
    }
}
