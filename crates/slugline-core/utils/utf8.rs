//! Byte-to-text decoding for screenplay sources
//!
//! Screenplays are read as UTF-8. A leading byte order mark is dropped, and
//! invalid sequences are either replaced or rejected depending on the
//! caller's strictness.

use crate::{CoreError, Result};

const UTF8_BOM: &str = "\u{FEFF}";

/// Text decoded from a source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSource {
    /// Decoded text without BOM
    pub text: String,
    /// Whether a UTF-8 BOM was stripped
    pub had_bom: bool,
    /// Whether invalid sequences were replaced with U+FFFD
    pub lossy: bool,
}

/// Strip a leading UTF-8 byte order mark
///
/// # Example
///
/// ```rust
/// use slugline_core::utils::strip_bom;
///
/// let (text, had_bom) = strip_bom("\u{FEFF}INT. HOUSE - DAY");
/// assert_eq!(text, "INT. HOUSE - DAY");
/// assert!(had_bom);
/// ```
pub fn strip_bom(text: &str) -> (&str, bool) {
    text.strip_prefix(UTF8_BOM)
        .map_or((text, false), |stripped| (stripped, true))
}

/// Decode raw source bytes as UTF-8
///
/// With `strict` set, the first invalid sequence is an
/// [`CoreError::InvalidEncoding`]; otherwise it is replaced and
/// [`DecodedSource::lossy`] is set.
///
/// # Errors
///
/// Returns [`CoreError::InvalidEncoding`] in strict mode when `bytes` is not
/// valid UTF-8.
pub fn decode_source(bytes: &[u8], strict: bool) -> Result<DecodedSource> {
    let (text, lossy) = match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_string(), false),
        Err(err) if strict => {
            return Err(CoreError::InvalidEncoding {
                position: err.valid_up_to(),
                message: err.to_string(),
            });
        }
        Err(err) => {
            tracing::warn!(
                position = err.valid_up_to(),
                "source is not valid UTF-8, replacing invalid sequences"
            );
            (String::from_utf8_lossy(bytes).into_owned(), true)
        }
    };

    let (stripped, had_bom) = strip_bom(&text);
    let text = if had_bom {
        stripped.to_string()
    } else {
        text
    };

    Ok(DecodedSource {
        text,
        had_bom,
        lossy,
    })
}
