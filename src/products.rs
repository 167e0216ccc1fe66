//! Product search request paths and response mapping.

use crate::constants::{PRODUCTS_PATH, SEARCH_QUERY_PARAM};
use crate::error::SearchError;
use crate::request::{build_query_string, encode_param, QueryParams};
use crate::security::sanitize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Product as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDto {
    /// Display name.
    pub name: String,
    /// Names of the stores that carry the product.
    #[serde(default)]
    pub available_stores: Vec<String>,
    /// Store name to the store's product id.
    #[serde(default)]
    pub product_store_mapping: HashMap<String, i64>,
}

/// Product as exposed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductItem {
    /// Display name.
    pub name: String,
    /// Names of the stores that carry the product.
    pub available_stores: Vec<String>,
    /// Store name to the store's product id.
    pub store_id_map: HashMap<String, i64>,
    /// Product image, never set by the search endpoint.
    pub image_url: Option<String>,
}

/// Convert a search result into the caller-facing item.
pub fn map_product(dto: ProductDto) -> ProductItem {
    ProductItem {
        name: dto.name,
        available_stores: dto.available_stores,
        store_id_map: dto.product_store_mapping,
        image_url: None,
    }
}

/// Request path for a product search, or `None` if the input sanitizes to
/// nothing and no request should be made.
pub fn product_search_path(raw: &str, max_len: usize) -> Option<String> {
    let clean = sanitize(Some(raw), max_len);
    if clean.is_empty() {
        return None;
    }
    let params = QueryParams::new().with(SEARCH_QUERY_PARAM, clean);
    Some(format!("{}{}", PRODUCTS_PATH, build_query_string(&params)))
}

/// Request path for a single product's price lookup.
pub fn product_path(product_id: &str) -> Result<String, SearchError> {
    let id = product_id.trim();
    if id.is_empty() {
        return Err(SearchError::invalid_input("Product id cannot be empty"));
    }
    Ok(format!("{}/{}", PRODUCTS_PATH, encode_param(id)))
}

/// Decode a search response body.
///
/// A body that is valid JSON but not an array yields no products.
pub fn parse_product_list(body: &str) -> Result<Vec<ProductItem>, SearchError> {
    let value: Value = serde_json::from_str(body)?;
    if !value.is_array() {
        return Ok(Vec::new());
    }
    let dtos: Vec<ProductDto> = serde_json::from_value(value)?;
    Ok(dtos.into_iter().map(map_product).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_path() {
        assert_eq!(
            product_search_path("milk 2.5%", 200).as_deref(),
            Some("/api/v1/products?q=milk%202.5%25")
        );
    }

    #[test]
    fn test_search_path_empty_after_sanitizing() {
        assert_eq!(product_search_path("", 200), None);
        assert_eq!(product_search_path("'; drop --", 200), None);
    }

    #[test]
    fn test_search_path_respects_max_len() {
        assert_eq!(
            product_search_path("bread", 3).as_deref(),
            Some("/api/v1/products?q=bre")
        );
    }

    #[test]
    fn test_product_path() {
        assert_eq!(product_path("42").unwrap(), "/api/v1/products/42");
        assert_eq!(product_path("a/b").unwrap(), "/api/v1/products/a%2Fb");
        assert!(matches!(product_path(" "), Err(SearchError::InvalidInput(_))));
    }

    #[test]
    fn test_parse_product_list() {
        let body = r#"[
            {"name": "Молоко 2.5%", "available_stores": ["atb", "silpo"],
             "product_store_mapping": {"atb": 11, "silpo": 42}},
            {"name": "Сир"}
        ]"#;
        let items = parse_product_list(body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].available_stores, ["atb", "silpo"]);
        assert_eq!(items[0].store_id_map.get("silpo"), Some(&42));
        assert_eq!(items[0].image_url, None);
        assert!(items[1].available_stores.is_empty());
        assert!(items[1].store_id_map.is_empty());
    }

    #[test]
    fn test_parse_non_array_is_empty() {
        assert!(parse_product_list(r#"{"error": "nope"}"#).unwrap().is_empty());
        assert!(parse_product_list("null").unwrap().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_product_list("[{"), Err(SearchError::Decode(_))));
        assert!(matches!(
            parse_product_list(r#"[{"available_stores": []}]"#),
            Err(SearchError::Decode(_))
        ));
    }
}
