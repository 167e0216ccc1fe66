//! Pattern table for search query sanitization.
//!
//! Every filter the sanitizer applies is an entry here: a compiled pattern,
//! the action taken on a match, and a short name used in log events. This is
//! a heuristic denylist, not a SQL parser.

use once_cell::sync::Lazy;
use regex::Regex;

/// What the sanitizer does with a rule match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleAction {
    /// Replace every match with a single space.
    ///
    /// A space rather than nothing keeps unrelated tokens on either side of
    /// the match from being joined into a new token.
    Blank,

    /// Drop everything from the first match to the end of the input.
    Truncate,
}

/// A single sanitization rule.
#[derive(Debug)]
pub struct Rule {
    /// Short name reported in log events.
    pub name: &'static str,
    /// Compiled pattern.
    pub pattern: Regex,
    /// Action taken on a match.
    pub action: RuleAction,
}

impl Rule {
    /// Apply this rule, returning `None` when the pattern does not match.
    pub fn apply(&self, input: &str) -> Option<String> {
        let first = self.pattern.find(input)?;
        let output = match self.action {
            RuleAction::Blank => self.pattern.replace_all(input, " ").into_owned(),
            RuleAction::Truncate => input[..first.start()].to_string(),
        };
        Some(output)
    }
}

// These should never fail since patterns are hardcoded and tested.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern)
        .unwrap_or_else(|e| panic!("Internal error: invalid regex pattern '{}': {}", pattern, e))
}

fn rule(name: &'static str, pattern: &str, action: RuleAction) -> Rule {
    Rule {
        name,
        pattern: compile(pattern),
        action,
    }
}

/// Rules applied once, in order, right after Unicode normalization.
///
/// Order matters: control characters go first so a line comment can no
/// longer stop at a newline, and terminated block comments are removed
/// before an unterminated opener cuts the rest of the input.
pub static STRUCTURAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule("control character", r"[\x00-\x1F\x7F]", RuleAction::Blank),
        rule("line comment", r"--[^\n\r]*", RuleAction::Blank),
        rule("block comment", r"(?s)/\*.*?\*/", RuleAction::Blank),
        rule("unterminated block comment", r"/\*", RuleAction::Truncate),
        rule("stray comment terminator", r"\*/", RuleAction::Blank),
        rule("metacharacter", r#"[;"'`\\]"#, RuleAction::Blank),
    ]
});

/// Rules applied repeatedly until none of them matches.
///
/// Removing one payload can expose another (`or select 1=1` becomes
/// `or 1=1`), so a single pass is not enough. Every match is at least four
/// characters and is replaced by one, so the loop always terminates.
pub static PAYLOAD_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        // Only the literal 1=1 comparison; other always-true expressions pass.
        // Boundaries are ASCII so `сирor 1=1` still counts; U+FEFF pads like whitespace.
        rule(
            "tautology",
            r"(?i)(?-u:\b)(?:or|and)[\s\x{FEFF}]+[(\s\x{FEFF}]*1[\s\x{FEFF}]*=[\s\x{FEFF}]*1[)\s\x{FEFF}]*",
            RuleAction::Blank,
        ),
        rule(
            "sql keyword",
            r"(?i)(?-u:\b)(?:select|union|insert|update|delete|drop|alter|create|exec|execute)(?-u:\b)",
            RuleAction::Blank,
        ),
    ]
});
