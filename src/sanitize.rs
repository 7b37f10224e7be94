//! Making untrusted HTML safe to display
//!
//! Two policies exist. [`sanitize_html`] keeps the markup but removes
//! everything that can run code. [`strip_to_text`] removes all markup and
//! leaves plain text lines.

use crate::types::HtmlPolicy;
use ammonia::{Builder, UrlRelative};
use std::collections::HashSet;

/// URL schemes allowed in `href` and `src`
const SAFE_URL_SCHEMES: [&str; 4] = ["http", "https", "mailto", "cid"];

/// Render an HTML body under the given policy.
///
/// Returns the display text and whether it is still markup.
#[must_use]
pub fn render_html(html: &str, policy: HtmlPolicy) -> (String, bool) {
    match policy {
        HtmlPolicy::Sanitize => (sanitize_html(html), true),
        HtmlPolicy::StripToText => (strip_to_text(html), false),
    }
}

/// Keep a whitelist of formatting markup and drop the rest.
///
/// Script and style elements go together with their content. Event handler
/// attributes never survive, and links or images only keep absolute URLs
/// with a safe scheme. Text outside tags is kept.
#[must_use]
pub fn sanitize_html(html: &str) -> String {
    Builder::default()
        .url_schemes(SAFE_URL_SCHEMES.into_iter().collect::<HashSet<_>>())
        .url_relative(UrlRelative::Deny)
        .clean(html)
        .to_string()
}

/// Drop all markup, turning block boundaries into line breaks
#[must_use]
pub fn strip_to_text(html: &str) -> String {
    let html = sanitize_html(html);
    let mut result = String::with_capacity(html.len());
    let mut tag = String::new();
    let mut in_tag = false;
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if in_tag {
            if c == '>' {
                in_tag = false;
                if ends_line(&tag) {
                    result.push('\n');
                }
                tag.clear();
            } else {
                tag.push(c.to_ascii_lowercase());
            }
        } else if c == '<' && chars.peek().is_some_and(|&next| opens_tag(next)) {
            in_tag = true;
        } else {
            result.push(c);
        }
    }

    let result = result
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    result
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

const fn opens_tag(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '/' || c == '!'
}

fn ends_line(tag: &str) -> bool {
    tag.starts_with("br")
        || tag.starts_with("/div")
        || tag.starts_with("/p")
        || tag.starts_with("/li")
        || tag.starts_with("/tr")
        || tag.starts_with("/h")
}
