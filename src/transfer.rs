//! Content-Transfer-Encoding decoding for bodies

use crate::charset::bytes_to_string;
use crate::headers::normalize_line_endings;
use crate::normalize::{DOUBLE_ENCODING_CLEANUP, run_pipeline};
use crate::types::Decoded;
use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use quoted_printable::ParseMode;
use regex::Regex;
use tracing::debug;

/// Base64 engine that accepts missing or superfluous padding
pub const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Marker left behind when UTF-8 was encoded twice
const DOUBLE_ENCODING_MARKER: char = '\u{c2}';

// Soft break, encoded `=` or space, or an escaped UTF-8 lead + continuation pair
static QUOTED_PRINTABLE_HINT: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)=\r?\n|=3D|=20|=[C-F][0-9A-F]=[89AB][0-9A-F]").unwrap()
});

/// Declared `Content-Transfer-Encoding` of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferEncoding {
    QuotedPrintable,
    Base64,
    /// `7bit`, `8bit` or `binary`
    Identity,
    /// No header, or a value we do not recognize
    Unspecified,
}

impl TransferEncoding {
    #[must_use]
    pub fn from_header(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return Self::Unspecified;
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "quoted-printable" => Self::QuotedPrintable,
            "base64" => Self::Base64,
            "7bit" | "8bit" | "binary" => Self::Identity,
            _ => Self::Unspecified,
        }
    }
}

/// Decode a body according to its transfer encoding and charset.
///
/// Undeclared encodings are treated as quoted-printable when the content
/// looks like it. Anything that fails to decode is returned unchanged.
#[must_use]
pub fn decode_body(content: &str, encoding: TransferEncoding, charset: Option<&str>) -> String {
    let decoded = match encoding {
        TransferEncoding::QuotedPrintable => try_decode_quoted_printable(content, charset),
        TransferEncoding::Unspecified if looks_quoted_printable(content) => {
            try_decode_quoted_printable(content, charset)
        }
        TransferEncoding::Base64 => try_decode_base64(content, charset),
        TransferEncoding::Identity | TransferEncoding::Unspecified => {
            Decoded::Value(content.to_string())
        }
    };
    if decoded.is_pass_through() {
        debug!("body left undecoded ({encoding:?})");
    }
    decoded.or_original(content)
}

/// Decode quoted-printable UTF-8 text, returning the input on failure.
///
/// Line breaks come back as `\n`. When double-encoded spaces are repaired,
/// whitespace runs are collapsed within each line but the line breaks
/// themselves are kept.
///
/// ```rust
/// use email_review::decode_quoted_printable;
///
/// assert_eq!(decode_quoted_printable("Hello=20World"), "Hello World");
/// assert_eq!(decode_quoted_printable("one=C3=82=C2=A0  two\nthree"), "one two\nthree");
/// ```
#[must_use]
pub fn decode_quoted_printable(content: &str) -> String {
    try_decode_quoted_printable(content, None).or_original(content)
}

/// Remove soft line breaks, expand `=XX` escapes and repair double-encoded
/// spaces when the decoded text shows signs of it.
///
/// Malformed escapes are kept literally. Trailing whitespace on each line is
/// dropped as RFC 2045 requires.
#[must_use]
pub fn try_decode_quoted_printable(content: &str, charset: Option<&str>) -> Decoded {
    let Ok(bytes) = quoted_printable::decode(content, ParseMode::Robust) else {
        return Decoded::PassThrough;
    };
    let Some(text) = bytes_to_string(&bytes, charset) else {
        return Decoded::PassThrough;
    };
    let text = normalize_line_endings(&text);

    if text.contains(DOUBLE_ENCODING_MARKER) {
        Decoded::Value(run_pipeline(DOUBLE_ENCODING_CLEANUP, &text))
    } else {
        Decoded::Value(text)
    }
}

/// Decode a base64 body, ignoring line breaks and other whitespace
#[must_use]
pub fn try_decode_base64(content: &str, charset: Option<&str>) -> Decoded {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    LENIENT_BASE64
        .decode(compact)
        .ok()
        .and_then(|bytes| bytes_to_string(&bytes, charset))
        .into()
}

/// Whether undeclared content carries quoted-printable escapes.
///
/// Quoted-printable is 7-bit, so content with raw 8-bit characters never
/// qualifies.
#[must_use]
pub fn looks_quoted_printable(content: &str) -> bool {
    content.is_ascii() && QUOTED_PRINTABLE_HINT.is_match(content)
}
