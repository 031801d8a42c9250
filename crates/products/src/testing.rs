//! Test-data factory for products.
//!
//! Produces unpersisted products with random but valid field values. Any field
//! can be pinned with the builder methods; pinned values apply to every product
//! built afterwards.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;

use crate::category::Category;
use crate::price::Price;
use crate::product::Product;

const ADJECTIVES: &[&str] = &[
    "Classic", "Deluxe", "Compact", "Rugged", "Vintage", "Smart", "Organic", "Heavy-Duty",
];

const NOUNS: &[&str] = &[
    "Fedora", "Sneakers", "Toaster", "Wrench", "Hammer", "Blender", "Tire", "Apple", "Bread",
    "Jacket", "Kettle", "Drill",
];

const SENTENCES: &[&str] = &[
    "Built to last through daily use.",
    "A customer favourite for years.",
    "Lightweight and easy to carry.",
    "Ships in recyclable packaging.",
    "Backed by a one-year warranty.",
];

pub struct ProductFactory {
    rng: StdRng,
    name: Option<String>,
    description: Option<String>,
    price: Option<Price>,
    available: Option<bool>,
    category: Option<Category>,
}

impl Default for ProductFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductFactory {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Deterministic factory for reproducible tests.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            rng,
            name: None,
            description: None,
            price: None,
            available: None,
            category: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn build(&mut self) -> Product {
        let name = match &self.name {
            Some(n) => n.clone(),
            None => self.random_name(),
        };
        let description = match &self.description {
            Some(d) => d.clone(),
            None => self.random_description(),
        };
        let price = match self.price {
            Some(p) => p,
            // 50.00 ..= 800.00, two decimal places.
            None => Price::new(Decimal::new(self.rng.gen_range(5_000..=80_000), 2)),
        };
        let available = match self.available {
            Some(a) => a,
            None => self.rng.gen_bool(0.5),
        };
        let category = match self.category {
            Some(c) => c,
            None => *Category::ALL.choose(&mut self.rng).unwrap_or(&Category::Unknown),
        };

        Product {
            id: None,
            name,
            description,
            price,
            available,
            category,
        }
    }

    pub fn build_many(&mut self, count: usize) -> Vec<Product> {
        (0..count).map(|_| self.build()).collect()
    }

    fn random_name(&mut self) -> String {
        let adjective = ADJECTIVES.choose(&mut self.rng).unwrap_or(&"Plain");
        let noun = NOUNS.choose(&mut self.rng).unwrap_or(&"Item");
        format!("{adjective} {noun}")
    }

    fn random_description(&mut self) -> String {
        let count = self.rng.gen_range(1..=3);
        (0..count)
            .filter_map(|_| SENTENCES.choose(&mut self.rng).copied())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Record;
    use serde_json::Value;

    #[test]
    fn built_products_pass_validation() {
        let mut factory = ProductFactory::seeded(7);
        for product in factory.build_many(50) {
            let mapping = Value::Object(product.serialize());
            let parsed = Product::from_mapping(&mapping).unwrap();
            assert_eq!(parsed.name, product.name);
            assert!(parsed.price.amount() >= Decimal::from(50));
            assert!(parsed.price.amount() <= Decimal::from(800));
        }
    }

    #[test]
    fn pinned_fields_are_respected() {
        let mut factory = ProductFactory::seeded(1).name("Fedora").category(Category::Cloths).available(false);
        let p = factory.build();
        assert_eq!(p.name, "Fedora");
        assert_eq!(p.category, Category::Cloths);
        assert!(!p.available);
        assert_eq!(p.id, None);
    }

    #[test]
    fn seeded_factories_are_deterministic() {
        let a = ProductFactory::seeded(42).build_many(5);
        let b = ProductFactory::seeded(42).build_many(5);
        assert_eq!(a, b);
    }
}
