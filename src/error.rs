use std::fmt::Display;

use thiserror::Error;

/// Errors that can arise while encoding a querystring.
///
/// Parsing never fails: malformed percent-escapes are copied through
/// unchanged and invalid UTF-8 decodes to replacement characters, so there
/// is no parse-side variant here.
#[derive(Debug, Error)]
pub enum Error {
    /// The byte at `position` starts a WTF-8-encoded surrogate code point.
    ///
    /// A lone surrogate has no UTF-8 representation, so it cannot be
    /// percent-encoded as text. This aborts the whole `stringify` call.
    #[error("cannot percent-encode unpaired surrogate at byte {position}")]
    InvalidEncodingInput { position: usize },

    /// A caller-supplied encode or decode hook failed.
    ///
    /// Decode hook failures are caught by the parser (the raw token is used
    /// instead); encode hook failures propagate out of `stringify`.
    #[error("{0}")]
    Hook(String),
}

impl Error {
    /// Builds a hook failure from any displayable message.
    pub fn hook<T: Display>(msg: T) -> Self {
        Error::Hook(msg.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
