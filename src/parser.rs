//! Assembly of decoded documents and list summaries

use crate::body::extract_body;
use crate::headers::parse_header_block;
use crate::sanitize::render_html;
use crate::types::{
    EmailDocument, HeaderMap, MessageSummary, NO_SUBJECT, ParseOptions, UNKNOWN_DATE,
    UNKNOWN_RECIPIENT, UNKNOWN_SENDER,
};
use chrono::{DateTime, FixedOffset};
use tracing::debug;

/// Display form of a parseable `Date` header
const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";

/// Decode a raw message into a displayable document.
///
/// This never fails. Input without a header block comes back as a degraded
/// document whose body is the raw source.
///
/// ```rust
/// use email_review::{ParseOptions, parse_email};
///
/// let raw = "From: sender@example.com\r\nSubject: Hello\r\n\r\nBody";
/// let email = parse_email(raw, &ParseOptions::default());
///
/// assert_eq!(email.subject, "Hello");
/// assert_eq!(email.body_text, "Body");
/// assert!(!email.body_is_html);
/// ```
#[must_use]
pub fn parse_email(raw: &str, options: &ParseOptions) -> EmailDocument {
    let block = parse_header_block(raw, options);
    if block.headers.is_empty() {
        debug!("no headers found, falling back to raw source");
        return EmailDocument::degraded(raw);
    }

    let parts = extract_body(&block.headers, &block.body, options.decode_passes());
    let (body_text, body_is_html) = match parts.preferred() {
        Some((html, true)) => render_html(html, options.html_policy),
        Some((text, false)) => (text.to_string(), false),
        None => (block.body.clone(), false),
    };
    let (date, parsed_date) = display_date(&block.headers, options);

    let email = EmailDocument {
        subject: header_or(&block.headers, "Subject", NO_SUBJECT),
        from: header_or(&block.headers, "From", UNKNOWN_SENDER),
        to: header_or(&block.headers, "To", UNKNOWN_RECIPIENT),
        date,
        parsed_date,
        headers: block.headers,
        body_text,
        body_is_html,
        raw_source: raw.to_string(),
    };

    debug!("Parsed email: {} from {}", email.subject, email.from);

    email
}

/// Read only what a list row needs: subject, sender and date
#[must_use]
pub fn parse_summary(raw: &str, options: &ParseOptions) -> MessageSummary {
    let headers = parse_header_block(raw, options).headers;
    let (date, parsed_date) = display_date(&headers, options);

    MessageSummary {
        subject: header_or(&headers, "Subject", NO_SUBJECT),
        from: header_or(&headers, "From", UNKNOWN_SENDER),
        date,
        parsed_date,
    }
}

fn header_or(headers: &HeaderMap, name: &str, fallback: &str) -> String {
    headers
        .get_non_empty(name)
        .unwrap_or(fallback)
        .to_string()
}

fn display_date(
    headers: &HeaderMap,
    options: &ParseOptions,
) -> (String, Option<DateTime<FixedOffset>>) {
    let Some(raw) = headers.get_non_empty("Date") else {
        return (UNKNOWN_DATE.to_string(), None);
    };

    let parsed = parse_date(raw);
    let display = match parsed {
        Some(date) if options.reformat_date => date.format(DISPLAY_DATE_FORMAT).to_string(),
        _ => raw.to_string(),
    };

    (display, parsed)
}

/// Parse an RFC 2822 date, falling back to the more lenient mail date parser
#[must_use]
pub fn parse_date(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw.trim()).ok().or_else(|| {
        mailparse::dateparse(raw)
            .ok()
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|date| date.fixed_offset())
    })
}
