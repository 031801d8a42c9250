use rust_decimal::Decimal;

use catalog_core::DomainError;

use crate::category::Category;
use crate::price::Price;
use crate::product::Product;

/// Selection over the product collection. Every match is exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    All,
    Name(String),
    Category(Category),
    Availability(bool),
    Price(Price),
}

impl ProductFilter {
    /// Availability filter with its default (`true`).
    pub fn availability_default() -> Self {
        ProductFilter::Availability(true)
    }

    /// Category filter with its default (`UNKNOWN`).
    pub fn category_default() -> Self {
        ProductFilter::Category(Category::default())
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Name(name) => product.name == *name,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::Availability(available) => product.available == *available,
            // Decimal equality ignores scale: 25.0 == 25.00.
            ProductFilter::Price(price) => product.price.amount() == price.amount(),
        }
    }
}

/// Price argument accepted by price lookups: an exact value or raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceQuery {
    Exact(Price),
    Text(String),
}

impl PriceQuery {
    pub fn resolve(self) -> Result<Price, DomainError> {
        match self {
            PriceQuery::Exact(price) => Ok(price),
            PriceQuery::Text(raw) => Price::parse(&raw),
        }
    }
}

impl From<Price> for PriceQuery {
    fn from(value: Price) -> Self {
        PriceQuery::Exact(value)
    }
}

impl From<Decimal> for PriceQuery {
    fn from(value: Decimal) -> Self {
        PriceQuery::Exact(Price::new(value))
    }
}

impl From<&str> for PriceQuery {
    fn from(value: &str) -> Self {
        PriceQuery::Text(value.to_string())
    }
}

impl From<String> for PriceQuery {
    fn from(value: String) -> Self {
        PriceQuery::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: &str, available: bool, category: Category) -> Product {
        let mut p = Product::new(name, "desc", Price::parse(price).unwrap(), category);
        p.available = available;
        p
    }

    #[test]
    fn name_match_is_exact() {
        let p = product("Fedora", "1", true, Category::Cloths);
        assert!(ProductFilter::Name("Fedora".into()).matches(&p));
        assert!(!ProductFilter::Name("fedora".into()).matches(&p));
        assert!(!ProductFilter::Name("Fedora ".into()).matches(&p));
    }

    #[test]
    fn price_match_compares_decimals() {
        let p = product("Fedora", "25.00", true, Category::Cloths);
        assert!(ProductFilter::Price(Price::parse("25").unwrap()).matches(&p));
        assert!(!ProductFilter::Price(Price::parse("25.01").unwrap()).matches(&p));
    }

    #[test]
    fn defaults() {
        let p = product("Thing", "1", true, Category::Unknown);
        assert!(ProductFilter::availability_default().matches(&p));
        assert!(ProductFilter::category_default().matches(&p));
        assert!(ProductFilter::All.matches(&p));
    }

    #[test]
    fn price_query_trims_text() {
        let price = PriceQuery::from(" \"9.99\"").resolve().unwrap();
        assert_eq!(price.amount(), Decimal::new(999, 2));
        assert!(PriceQuery::from("abc").resolve().is_err());
        let exact = PriceQuery::from(Decimal::new(5, 0)).resolve().unwrap();
        assert_eq!(exact.amount(), Decimal::from(5));
    }
}
