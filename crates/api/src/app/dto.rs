use axum::http::{header, HeaderMap};
use serde::Deserialize;
use serde_json::Value;

use catalog_core::{DomainError, ProductId, Record};
use catalog_products::{Category, Price, Product, ProductFilter};

// -------------------------
// Query DTOs
// -------------------------

/// `GET /products` query string. At most one filter applies; when several
/// are given the first of name, category, available, price wins.
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub available: Option<String>,
    pub price: Option<String>,
}

impl ListProductsQuery {
    pub fn into_filter(self) -> Result<ProductFilter, DomainError> {
        if let Some(name) = self.name {
            return Ok(ProductFilter::Name(name));
        }
        if let Some(category) = self.category {
            return parse_category(&category).map(ProductFilter::Category);
        }
        if let Some(available) = self.available {
            return parse_availability(&available).map(ProductFilter::Availability);
        }
        if let Some(price) = self.price {
            return Price::parse(&price).map(ProductFilter::Price);
        }
        Ok(ProductFilter::All)
    }
}

// -------------------------
// Parsing helpers
// -------------------------

pub fn parse_product_id(raw: &str) -> Result<ProductId, DomainError> {
    raw.parse()
}

/// Category names are matched exactly (`TOOLS`, not `tools`).
pub fn parse_category(raw: &str) -> Result<Category, DomainError> {
    Category::from_name(raw)
}

pub fn parse_availability(raw: &str) -> Result<bool, DomainError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(DomainError::validation(format!(
            "Invalid availability [{raw}]: expected true or false"
        ))),
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn product_to_json(product: &Product) -> Value {
    Value::Object(product.serialize())
}

pub fn products_to_json(products: &[Product]) -> Value {
    Value::Array(products.iter().map(product_to_json).collect())
}

/// Absolute URL of a product, built from the request's `Host` (and
/// `X-Forwarded-Proto`, defaulting to `http`). Falls back to the bare path
/// when the request carried no usable `Host`.
pub fn product_location(headers: &HeaderMap, id: ProductId) -> String {
    let path = format!("/products/{id}");
    let Some(host) = headers.get(header::HOST).and_then(|v| v.to_str().ok()) else {
        return path;
    };
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");
    format!("{scheme}://{host}{path}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_picks_first_present_filter() {
        let query = ListProductsQuery {
            name: None,
            category: Some("FOOD".into()),
            available: Some("false".into()),
            price: None,
        };
        assert_eq!(query.into_filter().unwrap(), ProductFilter::Category(Category::Food));

        assert_eq!(ListProductsQuery::default().into_filter().unwrap(), ProductFilter::All);
    }

    #[test]
    fn availability_accepts_words_and_digits() {
        assert!(parse_availability("True").unwrap());
        assert!(parse_availability("1").unwrap());
        assert!(!parse_availability("false").unwrap());
        assert!(!parse_availability("0").unwrap());
        assert!(parse_availability("maybe").is_err());
    }

    #[test]
    fn category_is_case_exact() {
        assert_eq!(parse_category("TOOLS").unwrap(), Category::Tools);
        assert!(parse_category("tools").is_err());
    }

    #[test]
    fn location_is_absolute_when_host_is_known() {
        let id = ProductId::new(7);
        assert_eq!(product_location(&HeaderMap::new(), id), "/products/7");

        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, "catalog.local:8080".parse().unwrap());
        assert_eq!(product_location(&headers, id), "http://catalog.local:8080/products/7");

        headers.insert("x-forwarded-proto", "https".parse().unwrap());
        assert_eq!(product_location(&headers, id), "https://catalog.local:8080/products/7");
    }

    #[test]
    fn bad_id_is_invalid_id() {
        assert!(matches!(parse_product_id("abc"), Err(DomainError::InvalidId(_))));
        assert_eq!(parse_product_id("42").unwrap(), ProductId::new(42));
    }
}
