//! Selection of the displayable body from a possibly multipart message

use crate::headers::{normalize_line_endings, parse_header_lines};
use crate::transfer::{TransferEncoding, decode_body};
use crate::types::{HeaderMap, MimePart};
use mailparse::ParsedContentType;
use tracing::{debug, trace};

/// Decoded plain-text and HTML renditions of a body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyParts {
    pub text: Option<String>,
    pub html: Option<String>,
}

impl BodyParts {
    /// Content to display, HTML first. The flag tells whether it is HTML.
    #[must_use]
    pub fn preferred(&self) -> Option<(&str, bool)> {
        self.html
            .as_deref()
            .map(|html| (html, true))
            .or_else(|| self.text.as_deref().map(|text| (text, false)))
    }
}

/// Pick the plain-text and HTML bodies out of a message body.
///
/// For multipart bodies only the first `text/plain` and the first
/// `text/html` part are kept; later parts of the same type are ignored.
/// When nothing usable is found the raw body becomes the plain text.
#[must_use]
pub fn extract_body(headers: &HeaderMap, body: &str, max_passes: usize) -> BodyParts {
    let content_type = headers
        .get("Content-Type")
        .map(mailparse::parse_content_type);
    let encoding = TransferEncoding::from_header(headers.get("Content-Transfer-Encoding"));
    let mimetype = content_type
        .as_ref()
        .map(|ct| ct.mimetype.to_ascii_lowercase())
        .unwrap_or_default();
    let charset = content_type.as_ref().and_then(|ct| param(ct, "charset"));

    if mimetype.contains("multipart") {
        match content_type.as_ref().and_then(|ct| param(ct, "boundary")) {
            Some(boundary) if !boundary.is_empty() => {
                let parts = extract_alternatives(body, boundary, max_passes);
                if parts.text.is_some() || parts.html.is_some() {
                    return parts;
                }
                debug!("no text part found under boundary {boundary}");
            }
            _ => debug!("multipart body without a boundary parameter"),
        }
        return BodyParts {
            text: Some(body.to_string()),
            html: None,
        };
    }

    let decoded = decode_body(body, encoding, charset);
    if mimetype == "text/html" {
        BodyParts {
            text: None,
            html: Some(decoded),
        }
    } else {
        BodyParts {
            text: Some(decoded),
            html: None,
        }
    }
}

/// Split a multipart body on `--boundary` into its parts.
///
/// The preamble and everything after the closing delimiter are dropped.
/// A part without a `Content-Type` is `text/plain`.
#[must_use]
pub fn split_multipart(body: &str, boundary: &str, max_passes: usize) -> Vec<MimePart> {
    let body = normalize_line_endings(body);
    let delimiter = format!("--{boundary}");
    let mut parts = Vec::new();

    for segment in body.split(delimiter.as_str()).skip(1) {
        if segment.starts_with("--") {
            break;
        }
        // The remainder of the delimiter line is padding
        let segment = segment.split_once('\n').map_or("", |(_, rest)| rest);
        let (head, content) = match segment.strip_prefix('\n') {
            Some(content) => ("", content),
            None => match segment.split_once("\n\n") {
                Some(split) => split,
                None => {
                    trace!("multipart segment without a header/body separator");
                    continue;
                }
            },
        };

        let headers = parse_header_lines(head, max_passes);
        let content_type = headers
            .get("Content-Type")
            .map(mailparse::parse_content_type);
        parts.push(MimePart {
            content_type: content_type
                .as_ref()
                .map_or_else(|| "text/plain".to_string(), |ct| ct.mimetype.to_ascii_lowercase()),
            charset: content_type
                .as_ref()
                .and_then(|ct| param(ct, "charset"))
                .map(str::to_string),
            transfer_encoding: headers
                .get("Content-Transfer-Encoding")
                .map(str::to_string),
            body: content.trim_end_matches('\n').to_string(),
        });
    }

    parts
}

fn extract_alternatives(body: &str, boundary: &str, max_passes: usize) -> BodyParts {
    let mut found = BodyParts::default();

    for part in split_multipart(body, boundary, max_passes) {
        let slot = match part.content_type.as_str() {
            "text/plain" => &mut found.text,
            "text/html" => &mut found.html,
            other => {
                trace!("skipping {other} part");
                continue;
            }
        };
        if slot.is_some() {
            debug!("ignoring additional {} part", part.content_type);
            continue;
        }
        *slot = Some(decode_body(
            &part.body,
            TransferEncoding::from_header(part.transfer_encoding.as_deref()),
            part.charset.as_deref(),
        ));
    }

    found
}

/// Content-Type parameter by name, ignoring ASCII case
fn param<'a>(content_type: &'a ParsedContentType, name: &str) -> Option<&'a str> {
    content_type
        .params
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}
