//! Centralized constants for the search query sanitizer.
//!
//! This module contains all magic numbers and default values used throughout
//! the codebase, making them easy to find, understand, and modify.

use std::time::Duration;

// =============================================================================
// Sanitizer Constants
// =============================================================================

/// Default maximum length of a sanitized query, in Unicode scalar values.
pub const DEFAULT_MAX_QUERY_LENGTH: usize = 200;

/// Smallest configurable maximum query length.
pub const MIN_MAX_QUERY_LENGTH: usize = 1;

/// Largest configurable maximum query length.
pub const MAX_MAX_QUERY_LENGTH: usize = 4096;

// =============================================================================
// Request Constants
// =============================================================================

/// Default base URL of the product API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Request path for product search and lookup.
pub const PRODUCTS_PATH: &str = "/api/v1/products";

/// Request path suffix appended by the generic search URL builder.
pub const SEARCH_PATH: &str = "/search";

/// Query parameter carrying the sanitized search text.
pub const SEARCH_QUERY_PARAM: &str = "q";

// =============================================================================
// Input Pacing Constants
// =============================================================================

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Default debounce delay as Duration.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(DEFAULT_DEBOUNCE_MS);

// =============================================================================
// Logging Constants
// =============================================================================

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,search_query_sanitizer=info";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debounce_duration() {
        assert_eq!(DEFAULT_DEBOUNCE, Duration::from_millis(300));
    }

    #[test]
    fn test_query_length_bounds() {
        assert!(DEFAULT_MAX_QUERY_LENGTH >= MIN_MAX_QUERY_LENGTH);
        assert!(DEFAULT_MAX_QUERY_LENGTH <= MAX_MAX_QUERY_LENGTH);
    }
}
