//! # Search Query Sanitizer
//!
//! Safe handling of untrusted free-text search input.
//!
//! This crate provides:
//! - **Sanitization**: Bounded, normalized search text with injection payloads removed
//! - **Query strings**: Percent-encoded `?key=value&...` construction with omission rules
//! - **Product requests**: Search and lookup paths, response decoding
//! - **Pacing**: Debounced input and stale-response tracking
//!
//! ## Architecture
//!
//! Raw text flows through the sanitizer, then into the encoder as the `q`
//! parameter, and the resulting query string is appended to a request path.
//! The sanitizer never URL-encodes and the encoder never inspects content.
//! Sanitization is best effort; the data layer behind the API must still
//! bind parameters.

pub mod config;
pub mod constants;
pub mod error;
pub mod pacing;
pub mod products;
pub mod request;
pub mod security;
pub mod telemetry;

pub use config::Config;
pub use error::SearchError;
pub use request::{build_query_string, build_search_url, encode_param, QueryParams};
pub use security::{sanitize, sanitize_query, Sanitizer};
