// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! Email Review Decoder
//!
//! Best-effort MIME decoding of raw email into a document that can be shown
//! to a human reviewer. Decoding never fails: malformed input degrades to
//! the raw source instead of an error.
//!
//! # Features
//!
//! - Folded headers and RFC 2047 encoded-words, decoded to a fixed point
//! - Quoted-printable and base64 bodies with mojibake repair
//! - First `text/plain` and `text/html` part of a multipart body
//! - HTML sanitizing, or full stripping to plain text
//! - Cheap header-only summaries for list views
//! - A review session over external storage and a verdict endpoint
//!
//! # Example
//!
//! ```rust
//! use email_review::{ParseOptions, parse_email, parse_summary};
//!
//! let raw = "From: sender@example.com\r\n\
//!            Subject: =?UTF-8?B?SGVsbG8=?=\r\n\
//!            Content-Type: text/html\r\n\
//!            \r\n\
//!            <p onclick=\"steal()\">Hi</p><script>alert(1)</script>";
//! let options = ParseOptions::default();
//! let email = parse_email(raw, &options);
//!
//! assert_eq!(email.subject, "Hello");
//! assert!(email.body_is_html);
//! assert_eq!(email.body_text, "<p>Hi</p>");
//! assert_eq!(parse_summary(raw, &options).subject, email.subject);
//! ```

mod body;
mod charset;
mod encoded_word;
mod error;
mod headers;
mod normalize;
mod parser;
mod review;
mod sanitize;
mod transfer;
mod types;

pub use body::{BodyParts, extract_body, split_multipart};
pub use charset::bytes_to_string;
pub use encoded_word::{
    decode_encoded_word, decode_header_value, decode_header_value_with, decode_pass,
};
pub use error::{Result, ReviewError};
pub use headers::{HeaderBlock, normalize_line_endings, parse_header_block, parse_header_lines};
pub use normalize::*;
pub use parser::{parse_date, parse_email, parse_summary};
pub use review::{ActionInvoker, ActionResponse, MessageStore, ReviewSession, VerdictPayload};
pub use sanitize::{render_html, sanitize_html, strip_to_text};
pub use transfer::{
    TransferEncoding, decode_body, decode_quoted_printable, looks_quoted_printable,
    try_decode_base64, try_decode_quoted_printable,
};
pub use types::*;
