//! Query string serialization.

use super::params::{ParamValue, QueryParams, Scalar};
use crate::constants::SEARCH_PATH;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything except RFC 3986 unreserved characters (`A-Z a-z 0-9 - . _ ~`).
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Stringify and percent-encode a single query component.
///
/// Unreserved characters pass through; everything else, including space and
/// each byte of non-ASCII characters, becomes an uppercase `%XX` escape.
/// No content inspection happens here: sanitize untrusted text first.
///
/// ```
/// use search_query_sanitizer::encode_param;
///
/// assert_eq!(encode_param("сир & молоко"), "%D1%81%D0%B8%D1%80%20%26%20%D0%BC%D0%BE%D0%BB%D0%BE%D0%BA%D0%BE");
/// assert_eq!(encode_param(42), "42");
/// ```
pub fn encode_param(value: impl Into<Scalar>) -> String {
    encode_component(&value.into().to_string())
}

fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, QUERY_COMPONENT).to_string()
}

/// Serialize parameters into a query string.
///
/// Returns `""` when nothing is emitted, otherwise `?` followed by
/// `&`-joined `key=value` pairs in insertion order. Absent values and
/// empty strings are skipped; list values repeat the key once per element.
pub fn build_query_string(params: &QueryParams) -> String {
    let mut parts = Vec::new();

    for (key, value) in params.iter() {
        let scalars: Vec<&Scalar> = match value {
            ParamValue::Absent => continue,
            ParamValue::Scalar(s) => vec![s],
            ParamValue::List(items) => items.iter().flatten().collect(),
        };

        let k = encode_component(key);
        for scalar in scalars.into_iter().filter(|s| !s.is_empty()) {
            parts.push(format!("{}={}", k, encode_component(&scalar.to_string())));
        }
    }

    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

/// Options for [`build_search_url`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Search text. Expected to be sanitized already.
    pub q: String,
    /// Result page.
    pub page: Option<u32>,
    /// Sort key.
    pub sort: Option<String>,
}

impl SearchOptions {
    /// Create options for a search text with no page or sort.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }

    /// Set the result page.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the sort key.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// Build a `<base>/search?...` URL.
///
/// One trailing slash on `base_url` is dropped.
pub fn build_search_url(base_url: &str, opts: &SearchOptions) -> String {
    let params = QueryParams::new()
        .with("q", opts.q.as_str())
        .with("page", opts.page)
        .with("sort", opts.sort.as_deref());
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    format!("{}{}{}", base, SEARCH_PATH, build_query_string(&params))
}
