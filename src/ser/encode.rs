use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

use crate::error::{Error, Result};

/// The historical `escape` set: every byte outside
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is percent-encoded.
///
/// Note that space is in the set, so it encodes as `%20` -- the encoder
/// never produces `+`, even though the decoder accepts it.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a string for use as a querystring key or value.
///
/// The input is encoded as UTF-8 and each byte outside the unreserved set
/// becomes `%XX`. Infallible: a `&str` cannot contain the unpaired
/// surrogates that make [`escape_bytes`] fail.
///
/// ```
/// use flat_qs::escape;
///
/// assert_eq!(escape("my weird field"), "my%20weird%20field");
/// assert_eq!(escape("!-._~'()*"), "!-._~'()*");
/// assert_eq!(escape("q1!2\"'w$5&7/z8)?"), "q1!2%22'w%245%267%2Fz8)%3F");
/// ```
pub fn escape(input: &str) -> String {
    percent_encoding::utf8_percent_encode(input, UNRESERVED).to_string()
}

/// Percent-encodes raw text bytes.
///
/// Bytes that do not form valid UTF-8 are still percent-encoded verbatim,
/// with one exception: a WTF-8-encoded surrogate code point
/// (`ED A0..BF xx`, the generalized-UTF-8 spelling of an unpaired UTF-16
/// surrogate half) cannot be represented as encoded text, and fails with
/// [`Error::InvalidEncodingInput`].
pub fn escape_bytes(input: &[u8]) -> Result<String> {
    if let Some(position) = find_surrogate(input) {
        return Err(Error::InvalidEncodingInput { position });
    }
    Ok(percent_encoding::percent_encode(input, UNRESERVED).to_string())
}

/// U+D800..U+DFFF encode as `ED A0..BF xx` in generalized UTF-8. Valid
/// UTF-8 never contains that prefix, so two bytes are enough to decide.
fn find_surrogate(input: &[u8]) -> Option<usize> {
    input
        .windows(2)
        .position(|pair| pair[0] == 0xED && (0xA0..=0xBF).contains(&pair[1]))
}

#[cfg(test)]
mod test {
    use super::{escape, escape_bytes};
    use crate::error::Error;

    use pretty_assertions::assert_eq;

    #[test]
    fn space_encodes_as_percent_20() {
        assert_eq!(escape(" foo = bar "), "%20foo%20%3D%20bar%20");
    }

    #[test]
    fn unreserved_set_passes_through() {
        assert_eq!(escape("!-._~'()*"), "!-._~'()*");
        assert_eq!(escape("abcdefghijklmnopqrstuvwxyz"), "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(escape("ABCDEFGHIJKLMNOPQRSTUVWXYZ"), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
        assert_eq!(escape("0123456789"), "0123456789");
    }

    #[test]
    fn multibyte_text_encodes_per_utf8_byte() {
        assert_eq!(escape("\u{fffd}"), "%EF%BF%BD");
        assert_eq!(escape("\u{100}"), "%C4%80");
    }

    #[test]
    fn separators_and_assignments_are_escaped() {
        assert_eq!(escape("a&b=c"), "a%26b%3Dc");
        assert_eq!(escape("goat[]"), "goat%5B%5D");
    }

    #[test]
    fn lone_surrogate_fails() {
        // WTF-8 for U+DC00
        let err = escape_bytes(b"foo\xed\xb0\x80").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidEncodingInput { position: 3 }
        ));

        // a complete code point in the same neighborhood is fine:
        // U+D7FF is ED 9F BF, just below the surrogate range
        assert_eq!(escape_bytes(b"\xed\x9f\xbf").unwrap(), "%ED%9F%BF");
    }

    #[test]
    fn arbitrary_bytes_encode_verbatim() {
        assert_eq!(escape_bytes(b"\xd3\xf2Ug").unwrap(), "%D3%F2Ug");
    }
}
