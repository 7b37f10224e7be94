//! RFC 2047 encoded-word decoding for header values
//!
//! Header values may hold `=?charset?B|Q?payload?=` tokens, several of them
//! in a row, and leftovers of earlier broken decoding. A value is decoded
//! pass after pass until it stops changing, bounded by a pass cap so that
//! pathological input always terminates.
//!
//! ```rust
//! use email_review::decode_header_value;
//!
//! assert_eq!(decode_header_value("=?UTF-8?B?SGVsbG8=?="), "Hello");
//! assert_eq!(decode_header_value("=?ISO-8859-1?Q?Caf=E9_au_lait?="), "Café au lait");
//! ```

use crate::charset::bytes_to_string;
use crate::normalize::{HEADER_CLEANUP, has_mojibake, run_pipeline, strip_invisible};
use crate::transfer::LENIENT_BASE64;
use crate::types::{DEFAULT_MAX_DECODE_PASSES, Decoded};
use base64::Engine;
use quoted_printable::ParseMode;
use regex::Regex;
use tracing::debug;

static ENCODED_WORD: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"=\?([^?\s]+)\?([BbQq])\?([^?\s]*)\?=").unwrap());

/// Decode a header value to a fixed point using the default pass cap
#[must_use]
pub fn decode_header_value(value: &str) -> String {
    decode_header_value_with(value, DEFAULT_MAX_DECODE_PASSES)
}

/// Decode a header value until it stops changing, at most `max_passes` times
#[must_use]
pub fn decode_header_value_with(value: &str, max_passes: usize) -> String {
    let mut current = value.to_string();
    for _ in 0..max_passes.max(1) {
        let next = decode_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
    debug!("header value still changing after {max_passes} decode passes");
    current
}

/// One decoding pass: expand every encoded-word, then clean up.
///
/// Tokens that fail to decode are kept as they are. Whitespace between two
/// adjacent decoded words is dropped. The cleanup pipeline only runs when
/// something was decoded or the value carries mojibake, so plain values come
/// back untouched.
#[must_use]
pub fn decode_pass(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut last_end = 0;
    let mut after_word = false;
    let mut decoded_any = false;

    for caps in ENCODED_WORD.captures_iter(value) {
        let Some(token) = caps.get(0) else {
            continue;
        };
        let between = &value[last_end..token.start()];
        if !(after_word && between.trim().is_empty()) {
            out.push_str(between);
        }

        match decode_encoded_word(&caps[1], &caps[2], &caps[3]) {
            Decoded::Value(text) => {
                out.push_str(&text);
                after_word = true;
                decoded_any = true;
            }
            Decoded::PassThrough => {
                debug!("passing through undecodable encoded-word {}", token.as_str());
                out.push_str(token.as_str());
                after_word = false;
            }
        }
        last_end = token.end();
    }
    out.push_str(&value[last_end..]);

    if decoded_any || has_mojibake(&out) {
        run_pipeline(HEADER_CLEANUP, &out)
    } else {
        out
    }
}

/// Decode the parts of a single encoded-word
#[must_use]
pub fn decode_encoded_word(charset: &str, encoding: &str, payload: &str) -> Decoded {
    // RFC 2231 language suffix, e.g. `UTF-8*en`
    let charset = charset.split('*').next().unwrap_or(charset);

    if encoding.eq_ignore_ascii_case("b") {
        LENIENT_BASE64
            .decode(payload)
            .ok()
            .and_then(|bytes| bytes_to_string(&bytes, Some(charset)))
            .map(|text| strip_invisible(&text))
            .into()
    } else if encoding.eq_ignore_ascii_case("q") {
        // `_` is an encoded space; as `=20` it survives trailing-space trimming
        quoted_printable::decode(payload.replace('_', "=20"), ParseMode::Robust)
            .ok()
            .and_then(|bytes| bytes_to_string(&bytes, Some(charset)))
            .into()
    } else {
        Decoded::PassThrough
    }
}
