//! Products domain module.
//!
//! Business rules for catalog products, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod category;
pub mod filter;
pub mod price;
pub mod product;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use category::Category;
pub use filter::{PriceQuery, ProductFilter};
pub use price::Price;
pub use product::{Product, DESCRIPTION_MAX_LEN, NAME_MAX_LEN, REQUIRED_FIELDS};
