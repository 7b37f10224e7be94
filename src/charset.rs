//! Byte to text conversion according to a declared charset

use encoding_rs::{Encoding, UTF_8};

/// Turn decoded bytes into text according to a declared charset.
///
/// Labels are resolved the way browsers resolve them, so `latin1` reads as
/// Windows-1252 and `gb2312` as GBK. Returns `None` when the bytes are not
/// valid in that charset. Missing or unknown labels, and `us-ascii`, are
/// tried as UTF-8.
#[must_use]
pub fn bytes_to_string(bytes: &[u8], charset: Option<&str>) -> Option<String> {
    let encoding = charset
        .map(|c| c.trim().trim_matches('"'))
        .filter(|label| !is_ascii_label(label))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(std::borrow::Cow::into_owned)
}

// UTF-8 bodies are often labelled as ASCII
fn is_ascii_label(label: &str) -> bool {
    ["us-ascii", "ascii", "us_ascii"]
        .iter()
        .any(|ascii| label.eq_ignore_ascii_case(ascii))
}
