//! Postgres-backed product store.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError |
//! |------------|----------------------|------------|
//! | Database (unique violation) | `23505` | `Constraint` |
//! | Database (check violation) | `23514` | `Constraint` |
//! | Database (string too long) | `22001` | `Constraint` |
//! | Database (not null violation) | `23502` | `Constraint` |
//! | anything else | N/A | `Database` |

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use catalog_core::ProductId;
use catalog_products::{Category, Price, Product, ProductFilter};

use super::{ProductStore, StoreError};

const SELECT_COLUMNS: &str = "SELECT id, name, description, price, available, category FROM products";

const CREATE_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          BIGSERIAL PRIMARY KEY,
    name        VARCHAR(100) NOT NULL,
    description VARCHAR(250) NOT NULL,
    price       NUMERIC NOT NULL CHECK (price >= 0),
    available   BOOLEAN NOT NULL DEFAULT TRUE,
    category    TEXT NOT NULL DEFAULT 'UNKNOWN'
                CHECK (category IN ('UNKNOWN', 'CLOTHS', 'FOOD', 'HOUSEWARES', 'AUTOMOTIVE', 'TOOLS'))
)
"#;

const CREATE_INDEXES: [&str; 2] = [
    "CREATE INDEX IF NOT EXISTS products_name_idx ON products (name)",
    "CREATE INDEX IF NOT EXISTS products_category_idx ON products (category)",
];

/// Postgres-backed product store.
///
/// `PgPool` is internally reference-counted, so clones share one pool.
#[derive(Debug, Clone)]
pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `products` table and its indexes if they do not exist.
    #[instrument(skip(self), err)]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Initializing database");
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("migrate", e))?;
        for statement in CREATE_INDEXES {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("migrate", e))?;
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    #[instrument(skip(self), err)]
    async fn select(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let rows = match filter {
            ProductFilter::All => {
                sqlx::query(&format!("{SELECT_COLUMNS} ORDER BY id"))
                    .fetch_all(&self.pool)
                    .await
            }
            ProductFilter::Name(name) => {
                sqlx::query(&format!("{SELECT_COLUMNS} WHERE name = $1 ORDER BY id"))
                    .bind(name)
                    .fetch_all(&self.pool)
                    .await
            }
            ProductFilter::Category(category) => {
                sqlx::query(&format!("{SELECT_COLUMNS} WHERE category = $1 ORDER BY id"))
                    .bind(category.name())
                    .fetch_all(&self.pool)
                    .await
            }
            ProductFilter::Availability(available) => {
                sqlx::query(&format!("{SELECT_COLUMNS} WHERE available = $1 ORDER BY id"))
                    .bind(*available)
                    .fetch_all(&self.pool)
                    .await
            }
            ProductFilter::Price(price) => {
                sqlx::query(&format!("{SELECT_COLUMNS} WHERE price = $1 ORDER BY id"))
                    .bind(price.amount())
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| map_sqlx_error("select", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self, product), fields(name = %product.name), err)]
    async fn insert(&self, product: &Product) -> Result<ProductId, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, description, price, available, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.amount())
        .bind(product.available)
        .bind(product.category.name())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert", e))?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| StoreError::Corrupt(format!("insert returned no id: {e}")))?;
        Ok(ProductId::new(id))
    }

    #[instrument(skip(self, product), fields(product_id = %id), err)]
    async fn update(&self, id: ProductId, product: &Product) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2,
                description = $3,
                price = $4,
                available = $5,
                category = $6
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.amount())
        .bind(product.available)
        .bind(product.category.name())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("clear", e))?;
        Ok(())
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let corrupt = |e: sqlx::Error| StoreError::Corrupt(e.to_string());

    let id: i64 = row.try_get("id").map_err(corrupt)?;
    let category: String = row.try_get("category").map_err(corrupt)?;
    let category = Category::from_name(&category)
        .map_err(|e| StoreError::Corrupt(format!("product {id}: {}", e.message())))?;
    let price: Decimal = row.try_get("price").map_err(corrupt)?;

    Ok(Product {
        id: Some(ProductId::new(id)),
        name: row.try_get("name").map_err(corrupt)?,
        description: row.try_get("description").map_err(corrupt)?,
        price: Price::new(price),
        available: row.try_get("available").map_err(corrupt)?,
        category,
    })
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        let code = db_err.code();
        if let Some("23505" | "23514" | "22001" | "23502") = code.as_deref() {
            return StoreError::Constraint {
                operation,
                message: db_err.message().to_string(),
            };
        }
    }
    StoreError::Database { operation, source: err }
}
