//! URL query string construction.

mod encode;
mod params;

pub use encode::{build_query_string, build_search_url, encode_param, SearchOptions};
pub use params::{ParamValue, QueryParams, Scalar};
