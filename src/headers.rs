//! Header block parsing

use crate::encoded_word::decode_header_value_with;
use crate::types::{HeaderMap, ParseOptions};
use tracing::{debug, trace};

/// Headers and body split out of a raw message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub headers: HeaderMap,
    pub body: String,
}

/// Split a raw message at its first blank line and decode the headers.
///
/// Without a blank line the whole input, unchanged, is the body and the
/// header map is empty.
#[must_use]
pub fn parse_header_block(raw: &str, options: &ParseOptions) -> HeaderBlock {
    let text = normalize_line_endings(raw);
    let Some((head, body)) = text.split_once("\n\n") else {
        debug!("no blank line separating headers from body");
        return HeaderBlock {
            headers: HeaderMap::new(),
            body: raw.to_string(),
        };
    };

    HeaderBlock {
        headers: parse_header_lines(head, options.decode_passes()),
        body: body.to_string(),
    }
}

/// Convert CRLF and lone CR line terminators to LF
#[must_use]
pub fn normalize_line_endings(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// Parse header lines, unfolding continuations.
///
/// A line starting with a space or tab extends the header being built; its
/// trimmed text is appended after a single space. Each finished value goes
/// through encoded-word decoding before it is stored.
#[must_use]
pub fn parse_header_lines(block: &str, max_passes: usize) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let mut current: Option<(String, String)> = None;

    for line in block.lines() {
        if line.starts_with([' ', '\t']) {
            match current.as_mut() {
                Some((_, value)) => append_folded(value, line.trim()),
                None => trace!("continuation line before any header: {line}"),
            }
            continue;
        }

        if let Some((name, value)) = split_header_line(line) {
            flush(&mut headers, current.take(), max_passes);
            current = Some((name.to_string(), value.to_string()));
        } else {
            trace!("skipping malformed header line: {line}");
        }
    }
    flush(&mut headers, current, max_passes);

    headers
}

fn append_folded(value: &mut String, piece: &str) {
    if piece.is_empty() {
        return;
    }
    if !value.is_empty() {
        value.push(' ');
    }
    value.push_str(piece);
}

fn flush(headers: &mut HeaderMap, header: Option<(String, String)>, max_passes: usize) {
    if let Some((name, value)) = header {
        headers.set(&name, decode_header_value_with(&value, max_passes));
    }
}

/// Split `Name: value`, rejecting names that are empty or contain whitespace
fn split_header_line(line: &str) -> Option<(&str, &str)> {
    let (name, value) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    Some((name, value.trim()))
}
