//! SQLite Product Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{ProductRepositoryPort, RepositoryError};
use crate::domain::product::{NewProduct, Price, Product, ProductId, ProductName};

/// SQLite Product Repository
pub struct SqliteProductRepository {
    pool: DbPool,
}

impl SqliteProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    price: f64,
    availability: bool,
    created_at: String,
    updated_at: String,
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product::restore(
            ProductId::new(row.id),
            ProductName::new(row.name)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            Price::new(row.price)
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            row.availability,
            parse_timestamp(&row.created_at)?,
            parse_timestamp(&row.updated_at)?,
        ))
    }
}

const SELECT_COLUMNS: &str = "SELECT id, name, price, availability, created_at, updated_at FROM products";

#[async_trait]
impl ProductRepositoryPort for SqliteProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!("{} ORDER BY id ASC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Product::try_from).transpose()
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (name, price, availability, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(product.name.as_str())
        .bind(product.price.value())
        .bind(product.availability)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Product::restore(
            ProductId::new(result.last_insert_rowid()),
            product.name.clone(),
            product.price,
            product.availability,
            now,
            now,
        ))
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?, price = ?, availability = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(product.name().as_str())
        .bind(product.price().value())
        .bind(product.availability())
        .bind(product.updated_at().to_rfc3339())
        .bind(product.id().value())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(product.id()));
        }

        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
