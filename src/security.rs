//! Security module for search query sanitization.

mod rules;
mod sanitizer;

pub use rules::{Rule, RuleAction, PAYLOAD_RULES, STRUCTURAL_RULES};
pub use sanitizer::{sanitize, sanitize_query, Sanitizer};
