use email_review::*;

fn parse(raw: &str) -> EmailDocument {
    parse_email(raw, &ParseOptions::default())
}

#[test]
fn test_parse_simple_email() {
    let raw = "From: John Doe <john@example.com>\r\n\
               To: recipient@proton.me\r\n\
               Subject: Test Email\r\n\
               Date: Wed, 01 Jan 2025 12:00:00 +0000\r\n\
               Message-ID: <test123@example.com>\r\n\
               \r\n\
               Hello, this is a test email.";

    let email = parse(raw);

    assert_eq!(email.from, "John Doe <john@example.com>");
    assert_eq!(email.to, "recipient@proton.me");
    assert_eq!(email.subject, "Test Email");
    assert_eq!(email.date, "Jan 1, 2025, 12:00 PM");
    assert!(email.parsed_date.is_some());
    assert_eq!(email.body_text, "Hello, this is a test email.");
    assert!(!email.body_is_html);
    assert_eq!(email.raw_source, raw);
    assert_eq!(email.headers.get("message-id"), Some("<test123@example.com>"));
}

#[test]
fn test_missing_headers_use_defaults() {
    let email = parse("X-Mailer: test\n\nbody");

    assert_eq!(email.subject, NO_SUBJECT);
    assert_eq!(email.from, UNKNOWN_SENDER);
    assert_eq!(email.to, UNKNOWN_RECIPIENT);
    assert_eq!(email.date, UNKNOWN_DATE);
    assert!(email.parsed_date.is_none());
}

#[test]
fn test_blank_subject_uses_default() {
    let email = parse("Subject:   \nFrom: a@example.com\n\nbody");

    assert_eq!(email.subject, NO_SUBJECT);
}

#[test]
fn test_unparseable_date_kept_verbatim() {
    let email = parse("Date: sometime last week\n\nbody");

    assert_eq!(email.date, "sometime last week");
    assert!(email.parsed_date.is_none());
}

#[test]
fn test_date_reformat_can_be_disabled() {
    let options = ParseOptions {
        reformat_date: false,
        ..ParseOptions::default()
    };
    let email = parse_email("Date: Wed, 01 Jan 2025 12:00:00 +0000\n\nbody", &options);

    assert_eq!(email.date, "Wed, 01 Jan 2025 12:00:00 +0000");
    assert!(email.parsed_date.is_some());
}

#[test]
fn test_encoded_headers() {
    let raw = "From: =?UTF-8?Q?Andr=C3=A9?= <andre@example.com>\n\
               Subject: =?UTF-8?B?SGVsbG8gV29ybGQ=?=\n\
               \n\
               body";
    let email = parse(raw);

    assert_eq!(email.from, "André <andre@example.com>");
    assert_eq!(email.subject, "Hello World");
}

#[test]
fn test_multipart_prefers_html() {
    let raw = "From: a@example.com\n\
               Subject: Alt\n\
               Content-Type: multipart/alternative; boundary=XYZ\n\
               \n\
               --XYZ\n\
               Content-Type: text/plain\n\
               \n\
               A\n\
               --XYZ\n\
               Content-Type: text/html\n\
               \n\
               <p>B</p>\n\
               --XYZ--\n";
    let email = parse(raw);

    assert!(email.body_is_html);
    assert_eq!(email.body_text, "<p>B</p>");
}

#[test]
fn test_html_body_is_sanitized() {
    let raw = "From: a@example.com\n\
               Content-Type: text/html\n\
               \n\
               <script>alert(1)</script><p>safe</p>";
    let email = parse(raw);

    assert!(email.body_is_html);
    assert!(!email.body_text.contains("<script>"));
    assert!(email.body_text.contains("<p>safe</p>"));
}

#[test]
fn test_strip_to_text_policy() {
    let options = ParseOptions {
        html_policy: HtmlPolicy::StripToText,
        ..ParseOptions::default()
    };
    let raw = "From: a@example.com\n\
               Content-Type: text/html\n\
               \n\
               <html><body><h1>Hello</h1><p>World</p></body></html>";
    let email = parse_email(raw, &options);

    assert!(!email.body_is_html);
    assert_eq!(email.body_text, "Hello\nWorld");
}

#[test]
fn test_no_separator_degrades_to_raw_source() {
    let raw = "this is not an email\r\nat all=20really";
    let email = parse(raw);

    assert!(email.headers.is_empty());
    assert_eq!(email.body_text, raw);
    assert!(!email.body_is_html);
    assert_eq!(email.raw_source, raw);
    assert_eq!(email, EmailDocument::degraded(raw));
}

#[test]
fn test_empty_input() {
    let email = parse("");

    assert!(email.headers.is_empty());
    assert_eq!(email.body_text, "");
}

#[test]
fn test_summary_matches_full_parse() {
    let inputs = [
        "From: a@example.com\nSubject: =?UTF-8?B?SGVsbG8=?=\nDate: Wed, 01 Jan 2025 12:00:00 +0000\n\nbody",
        "Subject: only subject\n\nbody",
        "no headers at all",
        "Date: garbage\nFrom: \n\n",
    ];

    for raw in inputs {
        let options = ParseOptions::default();
        let full = parse_email(raw, &options);
        let summary = parse_summary(raw, &options);

        assert_eq!(summary, full.summary());
    }
}

#[test]
fn test_parse_date_fallbacks() {
    assert!(parse_date("Wed, 01 Jan 2025 12:00:00 +0000").is_some());
    assert!(parse_date("1 Jan 2025 12:00:00 +0100").is_some());
    assert!(parse_date("not a date").is_none());
}
