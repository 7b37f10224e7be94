//! Core types for decoded emails

use crate::error::{Result, ReviewError};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject shown when the message has none
pub const NO_SUBJECT: &str = "No subject";
/// Sender shown when the message has no `From`
pub const UNKNOWN_SENDER: &str = "Unknown sender";
/// Recipient shown when the message has no `To`
pub const UNKNOWN_RECIPIENT: &str = "Unknown recipient";
/// Date shown when the message has no `Date`
pub const UNKNOWN_DATE: &str = "Unknown date";

/// Default cap on repeated header decoding passes
pub const DEFAULT_MAX_DECODE_PASSES: usize = 5;

/// Ordered header map with case-insensitive names.
///
/// The casing of the first occurrence of a name is kept. Setting a name that
/// already exists replaces its value in place (last write wins), so the order
/// of entries is the order in which names first appeared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMap(Vec<(String, String)>);

impl HeaderMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert a header, overwriting any earlier value for the same name
    pub fn set(&mut self, name: &str, value: String) {
        if let Some(entry) = self
            .0
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
        {
            entry.1 = value;
        } else {
            self.0.push((name.to_string(), value));
        }
    }

    /// Look up a header value by name, ignoring ASCII case
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Value of a header if present and not blank
    #[must_use]
    pub fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.trim().is_empty())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Outcome of a decode step that is allowed to give up.
///
/// `PassThrough` means the input could not be decoded and must be used
/// verbatim by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Value(String),
    PassThrough,
}

impl Decoded {
    /// Decoded text, or the original input on pass-through
    #[must_use]
    pub fn or_original(self, original: &str) -> String {
        match self {
            Self::Value(value) => value,
            Self::PassThrough => original.to_string(),
        }
    }

    #[must_use]
    pub const fn is_pass_through(&self) -> bool {
        matches!(self, Self::PassThrough)
    }
}

impl From<Option<String>> for Decoded {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::PassThrough, Self::Value)
    }
}

/// How extracted HTML is made safe for display
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HtmlPolicy {
    /// Keep structural markup, remove scripts, styles, handlers and `javascript:` URIs
    #[default]
    Sanitize,
    /// Drop all markup and render line-broken plain text
    StripToText,
}

/// Options controlling a parse call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Policy applied to HTML bodies
    pub html_policy: HtmlPolicy,

    /// Upper bound on repeated encoded-word decoding of a header value
    pub max_decode_passes: usize,

    /// Reformat a parseable `Date` header into a display string
    pub reformat_date: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            html_policy: HtmlPolicy::default(),
            max_decode_passes: DEFAULT_MAX_DECODE_PASSES,
            reformat_date: true,
        }
    }
}

impl ParseOptions {
    /// Load options from a JSON object; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ReviewError::Config(e.to_string()))
    }

    /// Decode pass cap, never below one
    #[must_use]
    pub fn decode_passes(&self) -> usize {
        self.max_decode_passes.max(1)
    }
}

/// One sub-part of a multipart body, alive only while a body is extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimePart {
    /// Lowercased mime type, e.g. `text/html`
    pub content_type: String,

    /// Declared `charset` parameter
    pub charset: Option<String>,

    /// Declared `Content-Transfer-Encoding`
    pub transfer_encoding: Option<String>,

    /// Undecoded part body
    pub body: String,
}

/// A fully decoded email, ready for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDocument {
    /// Decoded headers
    pub headers: HeaderMap,

    pub subject: String,

    pub from: String,

    pub to: String,

    /// Display date, or the raw header when it could not be parsed
    pub date: String,

    /// Parsed `Date` header, if it could be read
    pub parsed_date: Option<DateTime<FixedOffset>>,

    /// Body to display, sanitized when `body_is_html`
    pub body_text: String,

    /// Whether `body_text` is markup
    pub body_is_html: bool,

    /// Verbatim input
    pub raw_source: String,
}

impl EmailDocument {
    /// Document used when the input has no recognizable header block
    #[must_use]
    pub fn degraded(raw: &str) -> Self {
        Self {
            headers: HeaderMap::new(),
            subject: NO_SUBJECT.to_string(),
            from: UNKNOWN_SENDER.to_string(),
            to: UNKNOWN_RECIPIENT.to_string(),
            date: UNKNOWN_DATE.to_string(),
            parsed_date: None,
            body_text: raw.to_string(),
            body_is_html: false,
            raw_source: raw.to_string(),
        }
    }

    /// Listing row for this document
    #[must_use]
    pub fn summary(&self) -> MessageSummary {
        MessageSummary {
            subject: self.subject.clone(),
            from: self.from.clone(),
            date: self.date.clone(),
            parsed_date: self.parsed_date,
        }
    }
}

/// Header-only view of a message for list rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSummary {
    pub subject: String,
    pub from: String,
    pub date: String,
    pub parsed_date: Option<DateTime<FixedOffset>>,
}

/// Reviewer decision on a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Safe,
    Spam,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Spam => write!(f, "SPAM"),
        }
    }
}
