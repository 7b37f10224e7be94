//! Named text normalization steps
//!
//! Cleanup after decoding is an ordered list of small steps. Each step is a
//! plain `fn(&str) -> String` so it can be tested on its own.

use regex::Regex;
use tracing::trace;

/// A single named normalization step
#[derive(Debug, Clone, Copy)]
pub struct NormalizeStep {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// Cleanup applied to header values after encoded-words were decoded
pub const HEADER_CLEANUP: &[NormalizeStep] = &[
    NormalizeStep {
        name: "repair_mojibake",
        apply: repair_mojibake,
    },
    NormalizeStep {
        name: "collapse_whitespace",
        apply: collapse_whitespace,
    },
    NormalizeStep {
        name: "fix_punctuation_spacing",
        apply: fix_punctuation_spacing,
    },
];

/// Cleanup applied to quoted-printable bodies carrying double-encoded UTF-8
pub const DOUBLE_ENCODING_CLEANUP: &[NormalizeStep] = &[
    NormalizeStep {
        name: "replace_encoded_spaces",
        apply: replace_encoded_spaces,
    },
    NormalizeStep {
        name: "collapse_inline_whitespace",
        apply: collapse_inline_whitespace,
    },
];

/// UTF-8 punctuation that was decoded as Windows-1252 or Latin-1, paired
/// with the intended character.
const MOJIBAKE: &[(&str, &str)] = &[
    ("\u{e2}\u{20ac}\u{2122}", "\u{2019}"),
    ("\u{e2}\u{20ac}\u{2dc}", "\u{2018}"),
    ("\u{e2}\u{20ac}\u{153}", "\u{201c}"),
    ("\u{e2}\u{20ac}\u{9d}", "\u{201d}"),
    ("\u{e2}\u{20ac}\u{201c}", "\u{2013}"),
    ("\u{e2}\u{20ac}\u{201d}", "\u{2014}"),
    ("\u{e2}\u{20ac}\u{a6}", "\u{2026}"),
    ("\u{e2}\u{80}\u{99}", "\u{2019}"),
    ("\u{e2}\u{80}\u{98}", "\u{2018}"),
    ("\u{e2}\u{80}\u{9c}", "\u{201c}"),
    ("\u{e2}\u{80}\u{9d}", "\u{201d}"),
    ("\u{e2}\u{80}\u{93}", "\u{2013}"),
    ("\u{e2}\u{80}\u{94}", "\u{2014}"),
    ("\u{e2}\u{80}\u{a6}", "\u{2026}"),
    ("\u{c2}\u{a0}", " "),
];

/// Zero-width characters that survive base64 round trips
const INVISIBLE: &[char] = &['\u{200b}', '\u{200c}', '\u{200d}', '\u{feff}'];

static SPACE_BEFORE_PUNCTUATION: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\s+([,.;:!?])").unwrap());

static SPACE_INSIDE_PARENS: std::sync::LazyLock<Regex> =
    std::sync::LazyLock::new(|| Regex::new(r"\(\s+|\s+\)").unwrap());

/// Run steps in order, feeding each one the previous output
#[must_use]
pub fn run_pipeline(steps: &[NormalizeStep], input: &str) -> String {
    steps.iter().fold(input.to_string(), |acc, step| {
        let out = (step.apply)(&acc);
        if out != acc {
            trace!("normalize step {} changed value", step.name);
        }
        out
    })
}

/// Whether the text carries any of the known mojibake sequences
#[must_use]
pub fn has_mojibake(s: &str) -> bool {
    MOJIBAKE.iter().any(|(bad, _)| s.contains(bad))
}

/// Replace known double-decoded punctuation with the intended characters
#[must_use]
pub fn repair_mojibake(s: &str) -> String {
    MOJIBAKE
        .iter()
        .fold(s.to_string(), |acc, (bad, good)| acc.replace(bad, good))
}

/// Remove zero-width spaces, joiners and byte order marks
#[must_use]
pub fn strip_invisible(s: &str) -> String {
    s.chars().filter(|c| !INVISIBLE.contains(c)).collect()
}

/// Collapse every whitespace run (line breaks included) to one space and trim
#[must_use]
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop spaces before `, . ; : ! ?` and just inside parentheses
#[must_use]
pub fn fix_punctuation_spacing(s: &str) -> String {
    let s = SPACE_BEFORE_PUNCTUATION.replace_all(s, "$1");
    SPACE_INSIDE_PARENS
        .replace_all(&s, |caps: &regex::Captures<'_>| {
            let paren = if caps[0].starts_with('(') { "(" } else { ")" };
            paren.to_string()
        })
        .into_owned()
}

/// Turn encoded non-breaking spaces, stray `Â` continuation markers and
/// `&nbsp;` entities into plain spaces
#[must_use]
pub fn replace_encoded_spaces(s: &str) -> String {
    s.replace("\u{c2}\u{a0}", " ")
        .replace("&nbsp;", " ")
        .replace('\u{c2}', " ")
}

/// Collapse runs of spaces and tabs on each line, keeping line breaks, then trim
#[must_use]
pub fn collapse_inline_whitespace(s: &str) -> String {
    s.split('\n')
        .map(|line| {
            line.split([' ', '\t', '\u{a0}'])
                .filter(|w| !w.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}
