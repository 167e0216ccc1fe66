//! Free-text search query sanitization.
//!
//! Turns untrusted input into a bounded, normalized string that can be
//! embedded in a downstream request. This is defense in depth only: the data
//! access layer behind the API is still expected to bind parameters.

use super::rules::{Rule, PAYLOAD_RULES, STRUCTURAL_RULES};
use crate::config::SanitizerConfig;
use crate::constants::DEFAULT_MAX_QUERY_LENGTH;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Sanitizer bound to a maximum output length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sanitizer {
    /// Maximum output length in Unicode scalar values
    max_len: usize,
}

impl Sanitizer {
    /// Create a sanitizer with the given maximum output length.
    pub fn new(max_len: usize) -> Self {
        Self { max_len }
    }

    /// Create a sanitizer from configuration.
    pub fn from_config(config: &SanitizerConfig) -> Self {
        Self::new(config.max_query_length)
    }

    /// Maximum output length in Unicode scalar values.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Sanitize a raw query. See [`sanitize`].
    pub fn sanitize(&self, input: Option<&str>) -> String {
        sanitize(input, self.max_len)
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUERY_LENGTH)
    }
}

/// Sanitize a raw query with the default maximum length of 200.
pub fn sanitize_query(input: &str) -> String {
    sanitize(Some(input), DEFAULT_MAX_QUERY_LENGTH)
}

/// Sanitize untrusted search input.
///
/// The result never exceeds `max_len` Unicode scalar values and contains no
/// control characters, SQL comment markers, quote or statement metacharacters,
/// `or 1=1` style tautologies, or standalone denylisted SQL keywords.
/// Whitespace is collapsed to single spaces and trimmed.
///
/// This function is total: absent or empty input yields an empty string and
/// nothing in the pipeline can fail.
///
/// # Examples
///
/// ```
/// use search_query_sanitizer::sanitize;
///
/// assert_eq!(sanitize(Some("  сир  кисломолочний  "), 200), "сир кисломолочний");
/// assert_eq!(sanitize(Some("milk'; DROP TABLE users --"), 200), "milk TABLE users");
/// assert_eq!(sanitize(None, 200), "");
/// ```
pub fn sanitize(input: Option<&str>, max_len: usize) -> String {
    let raw = match input {
        Some(s) if !s.is_empty() => s,
        _ => return String::new(),
    };

    let mut fired = Vec::new();

    // NFKC folds fullwidth and other compatibility forms (e.g. `－－`, `ｓｅｌｅｃｔ`)
    // into the ASCII the rules below look for.
    let normalized: String = raw.nfkc().collect();

    let scrubbed = apply_once(&STRUCTURAL_RULES, normalized, &mut fired);
    let mut output = collapse_whitespace(&strip_payloads(scrubbed, &mut fired));

    let cut = output.char_indices().nth(max_len).map(|(i, _)| i);
    if let Some(cut) = cut {
        output.truncate(cut);
        debug!(max_len, "Search query truncated");
        // A cut can turn `selection` into `select`.
        output = collapse_whitespace(&strip_payloads(output, &mut fired));
    }

    if !fired.is_empty() {
        debug!(
            rules = ?fired,
            input_len = raw.chars().count(),
            output_len = output.chars().count(),
            "Search query sanitized"
        );
    }

    output
}

fn apply_once(rules: &[Rule], mut s: String, fired: &mut Vec<&'static str>) -> String {
    for rule in rules {
        if let Some(next) = rule.apply(&s) {
            record(fired, rule.name);
            s = next;
        }
    }
    s
}

fn strip_payloads(mut s: String, fired: &mut Vec<&'static str>) -> String {
    loop {
        let mut changed = false;
        for rule in PAYLOAD_RULES.iter() {
            if let Some(next) = rule.apply(&s) {
                record(fired, rule.name);
                s = next;
                changed = true;
            }
        }
        if !changed {
            return s;
        }
    }
}

fn record(fired: &mut Vec<&'static str>, name: &'static str) {
    if !fired.contains(&name) {
        fired.push(name);
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_absent_input() {
        assert_eq!(sanitize(None, 200), "");
        assert_eq!(sanitize(Some(""), 200), "");
        assert_eq!(sanitize_query("   "), "");
    }

    #[test]
    fn test_preserves_ukrainian_text() {
        assert_eq!(sanitize_query("  сир  кисломолочний  "), "сир кисломолочний");
    }

    #[test]
    fn test_removes_comments_and_metacharacters() {
        let out = sanitize_query("молоко -- drop table users; /* comment */ 'молоко' ; \"");
        for bad in ["--", "/*", "*/", "'", "\"", ";"] {
            assert!(!out.contains(bad), "{bad:?} in {out:?}");
        }
        assert_eq!(out, "молоко");
    }

    #[test]
    fn test_block_comment_without_line_comment() {
        assert_eq!(sanitize_query("сир /* comment */ 'молоко'"), "сир молоко");
    }

    #[test]
    fn test_unterminated_block_comment_deletes_to_end() {
        assert_eq!(sanitize_query("milk /* never closed; bread"), "milk");
        assert_eq!(sanitize_query("/*/ x"), "");
    }

    #[test]
    fn test_stray_comment_terminator() {
        assert_eq!(sanitize_query("milk */ bread"), "milk bread");
    }

    #[test]
    fn test_line_comment_runs_to_end_of_input() {
        // Newlines become spaces before comments are stripped.
        assert_eq!(sanitize_query("milk -- x\nbread"), "milk");
    }

    #[test]
    fn test_control_characters_become_spaces() {
        assert_eq!(sanitize_query("milk\u{0}bread\u{7f}cheese\tbutter"), "milk bread cheese butter");
    }

    #[test]
    fn test_metacharacters_do_not_join_tokens() {
        assert_eq!(sanitize_query("milk;bread"), "milk bread");
        assert_eq!(sanitize_query(r"a`b\c"), "a b c");
    }

    #[test]
    fn test_neutralizes_tautology() {
        let out = sanitize_query("сир OR 1=1");
        assert_eq!(out, "сир");
        assert_eq!(sanitize_query("milk and (1 = 1) bread"), "milk bread");
    }

    #[test]
    fn test_tautology_limited_to_literal_one_equals_one() {
        assert_eq!(sanitize_query("milk or 2=2"), "milk or 2=2");
    }

    #[test]
    fn test_removes_standalone_keywords() {
        assert_eq!(sanitize_query("select сир union all молоко"), "сир all молоко");
        assert_eq!(sanitize_query("ExEcUtE exec Drop"), "");
    }

    #[test]
    fn test_keeps_keywords_inside_words() {
        assert_eq!(sanitize_query("selection"), "selection");
        assert_eq!(sanitize_query("updated dropped creates"), "updated dropped creates");
    }

    #[test]
    fn test_keywords_adjacent_to_cyrillic() {
        assert_eq!(sanitize_query("молокоselect"), "молоко");
        assert_eq!(sanitize_query("selectмолоко"), "молоко");
        assert_eq!(sanitize_query("сирor 1=1"), "сир");
    }

    #[test]
    fn test_byte_order_mark_pads_tautology() {
        assert_eq!(sanitize_query("or\u{FEFF}1=1"), "");
        assert_eq!(sanitize_query("milk and\u{FEFF}(1=1)"), "milk");
    }

    #[test]
    fn test_keyword_removal_exposing_tautology() {
        assert_eq!(sanitize_query("milk or select 1=1"), "milk");
    }

    #[test]
    fn test_nfkc_folds_fullwidth_payloads() {
        assert_eq!(sanitize_query("ｓｅｌｅｃｔ milk"), "milk");
        assert_eq!(sanitize_query("milk －－ comment"), "milk");
    }

    #[test]
    fn test_caps_length() {
        let out = sanitize_query(&"а".repeat(500));
        assert_eq!(out.chars().count(), 200);
    }

    #[test]
    fn test_truncation_trims_trailing_space() {
        assert_eq!(sanitize(Some("ab cd"), 3), "ab");
    }

    #[test]
    fn test_truncation_cannot_expose_keyword() {
        assert_eq!(sanitize(Some("milk selection"), 11), "milk");
    }

    #[test]
    fn test_zero_max_len() {
        assert_eq!(sanitize(Some("milk"), 0), "");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for s in [
            "  сир  кисломолочний  ",
            "молоко -- drop table users; /* comment */ 'молоко' ; \"",
            "select сир union all молоко",
            "milk or select 1=1",
        ] {
            let once = sanitize_query(s);
            assert_eq!(sanitize_query(&once), once);
        }
    }

    #[test]
    fn test_sanitizer_struct_uses_max_len() {
        let sanitizer = Sanitizer::new(4);
        assert_eq!(sanitizer.max_len(), 4);
        assert_eq!(sanitizer.sanitize(Some("bread")), "brea");
        assert_eq!(Sanitizer::default().max_len(), 200);
    }
}
