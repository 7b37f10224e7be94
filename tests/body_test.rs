use email_review::*;

fn headers(content_type: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.set("Content-Type", content_type.to_string());
    headers
}

const ALTERNATIVE: &str = "preamble\n\
--XYZ\n\
Content-Type: text/plain\n\
\n\
A\n\
--XYZ\n\
Content-Type: text/html\n\
\n\
<p>B</p>\n\
--XYZ--\n\
epilogue";

#[test]
fn test_multipart_alternative() {
    let parts = extract_body(&headers("multipart/alternative; boundary=XYZ"), ALTERNATIVE, 5);

    assert_eq!(parts.text.as_deref(), Some("A"));
    assert_eq!(parts.html.as_deref(), Some("<p>B</p>"));
    assert_eq!(parts.preferred(), Some(("<p>B</p>", true)));
}

#[test]
fn test_quoted_boundary_parameter() {
    let parts = extract_body(
        &headers("multipart/alternative; boundary=\"XYZ\""),
        ALTERNATIVE,
        5,
    );

    assert_eq!(parts.text.as_deref(), Some("A"));
}

#[test]
fn test_first_part_of_each_type_wins() {
    let body = "--b\n\
Content-Type: text/html\n\
\n\
<p>first</p>\n\
--b\n\
Content-Type: text/html\n\
\n\
<p>second</p>\n\
--b--\n";
    let parts = extract_body(&headers("multipart/alternative; boundary=b"), body, 5);

    assert_eq!(parts.html.as_deref(), Some("<p>first</p>"));
    assert!(parts.text.is_none());
}

#[test]
fn test_parts_are_transfer_decoded() {
    let body = "--sep\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
Content-Transfer-Encoding: quoted-printable\r\n\
\r\n\
caf=C3=A9 au =\r\n\
lait\r\n\
--sep\r\n\
Content-Type: text/html; charset=utf-8\r\n\
Content-Transfer-Encoding: base64\r\n\
\r\n\
PHA+SGk8L3A+\r\n\
--sep--\r\n";
    let parts = extract_body(&headers("multipart/alternative; boundary=sep"), body, 5);

    assert_eq!(parts.text.as_deref(), Some("café au lait"));
    assert_eq!(parts.html.as_deref(), Some("<p>Hi</p>"));
}

#[test]
fn test_latin1_part() {
    let body = "--sep\n\
Content-Type: text/plain; charset=iso-8859-1\n\
Content-Transfer-Encoding: quoted-printable\n\
\n\
Caf=E9\n\
--sep--\n";
    let parts = extract_body(&headers("multipart/mixed; boundary=sep"), body, 5);

    assert_eq!(parts.text.as_deref(), Some("Café"));
}

#[test]
fn test_cyrillic_base64_part() {
    let body = "--sep\n\
Content-Type: text/plain; charset=windows-1251\n\
Content-Transfer-Encoding: base64\n\
\n\
xO7h8O7lIPPy8O4=\n\
--sep--\n";
    let parts = extract_body(&headers("multipart/mixed; boundary=sep"), body, 5);

    assert_eq!(parts.text.as_deref(), Some("Доброе утро"));
}

#[test]
fn test_single_part_charsets() {
    let mut cyrillic = headers("text/plain; charset=windows-1251");
    cyrillic.set("Content-Transfer-Encoding", "base64".to_string());
    assert_eq!(
        extract_body(&cyrillic, "z/Do4uXy", 5).text.as_deref(),
        Some("Привет")
    );

    let mut polish = headers("text/plain; charset=iso-8859-2");
    polish.set("Content-Transfer-Encoding", "quoted-printable".to_string());
    assert_eq!(
        extract_body(&polish, "Za=BF=F3=B3=E6 soft=\nbreak", 5).text.as_deref(),
        Some("Zażółć softbreak")
    );
}

#[test]
fn test_part_without_content_type_is_plain_text() {
    let body = "--sep\n\nimplicit text\n--sep--\n";
    let parts = split_multipart(body, "sep", 5);

    assert_eq!(parts.len(), 1);
    assert_eq!(parts[0].content_type, "text/plain");
    assert_eq!(parts[0].body, "implicit text");
}

#[test]
fn test_non_text_parts_are_ignored() {
    let body = "--sep\n\
Content-Type: image/png\n\
Content-Transfer-Encoding: base64\n\
\n\
iVBORw0KGgo=\n\
--sep\n\
Content-Type: text/plain\n\
\n\
caption\n\
--sep--\n";
    let parts = extract_body(&headers("multipart/mixed; boundary=sep"), body, 5);

    assert_eq!(parts.text.as_deref(), Some("caption"));
    assert!(parts.html.is_none());
}

#[test]
fn test_missing_boundary_falls_back_to_raw_body() {
    let parts = extract_body(&headers("multipart/alternative"), ALTERNATIVE, 5);

    assert_eq!(parts.text.as_deref(), Some(ALTERNATIVE));
    assert!(parts.html.is_none());
}

#[test]
fn test_no_matching_part_falls_back_to_raw_body() {
    let parts = extract_body(&headers("multipart/alternative; boundary=NOPE"), ALTERNATIVE, 5);

    assert_eq!(parts.text.as_deref(), Some(ALTERNATIVE));
}

#[test]
fn test_single_part_html() {
    let parts = extract_body(&headers("text/html; charset=utf-8"), "<b>bold</b>", 5);

    assert_eq!(parts.html.as_deref(), Some("<b>bold</b>"));
    assert!(parts.text.is_none());
}

#[test]
fn test_missing_content_type_is_plain_text() {
    let parts = extract_body(&HeaderMap::new(), "just text", 5);

    assert_eq!(parts.preferred(), Some(("just text", false)));
}

#[test]
fn test_single_part_quoted_printable() {
    let mut headers = headers("text/plain");
    headers.set("Content-Transfer-Encoding", "quoted-printable".to_string());
    let parts = extract_body(&headers, "Hello=20World", 5);

    assert_eq!(parts.text.as_deref(), Some("Hello World"));
}
