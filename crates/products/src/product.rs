use serde_json::{Map, Value};

use catalog_core::{json_type_name, DomainError, DomainResult, Entity, ProductId, Record};

use crate::category::Category;
use crate::price::Price;

/// Maximum length of `name`, in characters.
pub const NAME_MAX_LEN: usize = 100;
/// Maximum length of `description`, in characters.
pub const DESCRIPTION_MAX_LEN: usize = 250;

/// Keys every incoming mapping must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "description", "price", "available", "category"];

/// A product record.
///
/// `id` is `None` until the store assigns one on insert. The other fields are
/// plain data; validation happens when populating from a mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub available: bool,
    pub category: Category,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            price: Price::default(),
            available: true,
            category: Category::default(),
        }
    }
}

impl Product {
    /// Unpersisted, available product.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        category: Category,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available: true,
            category,
        }
    }

    /// Build a fresh (unpersisted) product from a mapping.
    pub fn from_mapping(data: &Value) -> DomainResult<Self> {
        let mut product = Product::default();
        product.deserialize(data)?;
        Ok(product)
    }

    /// Apply a partial mapping: keys present in `changes` override the current
    /// values, the rest are kept, then the merged mapping is validated as a whole.
    pub fn apply_changes(&mut self, changes: &Value) -> DomainResult<&mut Self> {
        let Some(changes) = changes.as_object() else {
            return self.deserialize(changes);
        };
        let mut merged = self.serialize();
        for (key, value) in changes {
            merged.insert(key.clone(), value.clone());
        }
        self.deserialize(&Value::Object(merged))
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[None]>", self.name),
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Option<ProductId> {
        self.id
    }

    fn clear_id(&mut self) {
        self.id = None;
    }

    fn assign_id(&mut self, id: ProductId) {
        self.id = Some(id);
    }
}

impl Record for Product {
    fn serialize(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(
            "id".to_string(),
            self.id.map(|id| Value::from(id.get())).unwrap_or(Value::Null),
        );
        map.insert("name".to_string(), Value::String(self.name.clone()));
        map.insert("description".to_string(), Value::String(self.description.clone()));
        map.insert("price".to_string(), Value::String(self.price.to_string()));
        map.insert("available".to_string(), Value::Bool(self.available));
        map.insert("category".to_string(), Value::String(self.category.name().to_string()));
        map
    }

    fn deserialize(&mut self, data: &Value) -> DomainResult<&mut Self> {
        let map = data.as_object().ok_or_else(|| {
            DomainError::validation(format!(
                "Invalid product: body of request contained bad or no data: expected object, got {}",
                json_type_name(data)
            ))
        })?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|k| !map.contains_key(**k)) {
            return Err(DomainError::validation(format!("Invalid product: missing {missing}")));
        }

        let name = text_field(map, "name", NAME_MAX_LEN)?;
        let description = text_field(map, "description", DESCRIPTION_MAX_LEN)?;

        let price = Price::from_json(&map["price"])?;
        if price.is_negative() {
            return Err(DomainError::validation(format!(
                "Invalid product: price must not be negative, got {price}"
            )));
        }

        let available = match &map["available"] {
            Value::Bool(b) => *b,
            other => {
                return Err(DomainError::validation(format!(
                    "Invalid type for boolean [available]: {}",
                    json_type_name(other)
                )));
            }
        };

        let category = match &map["category"] {
            Value::String(name) => Category::from_name(name)?,
            other => {
                return Err(DomainError::validation(format!(
                    "Invalid attribute: category must be a name, not {}",
                    json_type_name(other)
                )));
            }
        };

        self.name = name;
        self.description = description;
        self.price = price;
        self.available = available;
        self.category = category;
        Ok(self)
    }
}

fn text_field(map: &Map<String, Value>, key: &str, max_len: usize) -> DomainResult<String> {
    match &map[key] {
        Value::String(s) if s.is_empty() => Err(DomainError::validation(format!(
            "Invalid product: {key} must not be empty"
        ))),
        Value::String(s) if s.chars().count() > max_len => Err(DomainError::validation(format!(
            "Invalid product: {key} exceeds {max_len} characters"
        ))),
        Value::String(s) => Ok(s.clone()),
        other => Err(DomainError::validation(format!(
            "Invalid type for string [{key}]: {}",
            json_type_name(other)
        ))),
    }
}
