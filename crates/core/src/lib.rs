//! `catalog-core` — shared building blocks for the product catalog.
//!
//! This crate contains **pure** primitives (no storage, no HTTP): identifiers,
//! the error model, and the traits records implement.

pub mod entity;
pub mod error;
pub mod id;
pub mod record;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use record::{json_type_name, Record};
pub use value_object::ValueObject;
