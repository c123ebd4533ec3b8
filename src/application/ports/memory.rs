//! 测试用内存 Product Repository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::Mutex;

use super::{ProductRepositoryPort, RepositoryError};
use crate::domain::product::{NewProduct, Product, ProductId};

#[derive(Default)]
pub struct InMemoryProductRepository {
    inner: Mutex<(i64, BTreeMap<ProductId, Product>)>,
}

#[async_trait]
impl ProductRepositoryPort for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let guard = self.inner.lock().await;
        Ok(guard.1.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let guard = self.inner.lock().await;
        Ok(guard.1.get(&id).cloned())
    }

    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let mut guard = self.inner.lock().await;
        guard.0 += 1;
        let now = Utc::now();
        let record = Product::restore(
            ProductId::new(guard.0),
            product.name.clone(),
            product.price,
            product.availability,
            now,
            now,
        );
        guard.1.insert(record.id(), record.clone());
        Ok(record)
    }

    async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
        let mut guard = self.inner.lock().await;
        match guard.1.get_mut(&product.id()) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound(product.id())),
        }
    }

    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        self.inner.lock().await.1.remove(&id);
        Ok(())
    }
}
