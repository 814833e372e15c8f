use once_cell::sync::Lazy;
use regex::Regex;

/// A trailing `Book chapter:verse` citation, optionally with a verse range.
static TRAILING_CITATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z.\s]+?\b[0-9]{1,3}:[0-9]{1,3}(?:-[0-9]{1,3})?$")
        .expect("citation pattern is valid")
});

/// Quotation text split from its trailing citation.
///
/// `reference` is empty when no citation could be isolated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedVerse {
    pub text: String,
    pub reference: String,
}

impl ParsedVerse {
    pub fn has_reference(&self) -> bool {
        !self.reference.is_empty()
    }
}

type Rule = fn(&str) -> Option<ParsedVerse>;

/// Rules are tried in order against the trimmed input; the first match wins.
const RULES: [Rule; 2] = [split_at_spaced_dash, split_trailing_citation];

/// Splits verse text into quotation and reference. Total and deterministic.
pub fn parse(verse_text: &str) -> ParsedVerse {
    let trimmed = verse_text.trim();
    if trimmed.is_empty() {
        return ParsedVerse::default();
    }

    RULES
        .iter()
        .find_map(|rule| rule(trimmed))
        .unwrap_or_else(|| ParsedVerse {
            text: trimmed.to_string(),
            reference: String::new(),
        })
}

fn is_dash(ch: char) -> bool {
    matches!(ch, '-' | '\u{2013}' | '\u{2014}')
}

/// Last dash with whitespace on both sides. Ranges such as `24-25` have no
/// surrounding spaces and are never taken as the separator.
fn split_at_spaced_dash(input: &str) -> Option<ParsedVerse> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    (1..chars.len().saturating_sub(1)).rev().find_map(|i| {
        let (_, before) = chars[i - 1];
        let (_, dash) = chars[i];
        let (after_idx, after) = chars[i + 1];
        if !(is_dash(dash) && before.is_whitespace() && after.is_whitespace()) {
            return None;
        }
        // Trimmed input: a whitespace char here is never the last one.
        let reference = input[after_idx + after.len_utf8()..].trim();
        Some(ParsedVerse {
            text: input[..chars[i - 1].0].trim().to_string(),
            reference: reference.to_string(),
        })
    })
}

fn split_trailing_citation(input: &str) -> Option<ParsedVerse> {
    let found = TRAILING_CITATION.find(input)?;
    let text = input[..found.start()]
        .trim_end_matches(|ch: char| is_dash(ch) || ch.is_whitespace())
        .trim();
    Some(ParsedVerse {
        text: text.to_string(),
        reference: found.as_str().trim().to_string(),
    })
}
