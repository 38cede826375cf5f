//! Product repository for database operations.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use bookstall_core::ProductId;

use super::RepositoryError;
use crate::models::{NewProduct, Product};

/// Raw `products` row.
#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    writer: String,
    published_on: NaiveDate,
    quantity: f64,
    price: f64,
    image_path: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            writer: row.writer,
            published_on: row.published_on,
            quantity: row.quantity,
            price: row.price,
            image_path: row.image_path,
        }
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new product and return the generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, new: &NewProduct) -> Result<ProductId, RepositoryError> {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO products (name, writer, published_on, quantity, price, image_path)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            ",
        )
        .bind(&new.name)
        .bind(&new.writer)
        .bind(new.published_on)
        .bind(new.quantity)
        .bind(new.price)
        .bind(new.image_path.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(ProductId::new(id))
    }

    /// List all products, most recently added first (id descending).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r"
            SELECT id, name, writer, published_on, quantity, price, image_path
            FROM products
            ORDER BY id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }
}
