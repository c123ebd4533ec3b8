//! Product Command Handlers

use std::sync::Arc;

use crate::application::commands::{
    CreateProduct, DeleteProduct, ReplaceProduct, ToggleAvailability,
};
use crate::application::error::ApplicationError;
use crate::application::ports::ProductRepositoryPort;
use crate::domain::product::{NewProduct, Product};

const RESOURCE: &str = "Product";

// ============================================================================
// CreateProduct
// ============================================================================

/// CreateProduct Handler
pub struct CreateProductHandler {
    product_repo: Arc<dyn ProductRepositoryPort>,
}

impl CreateProductHandler {
    pub fn new(product_repo: Arc<dyn ProductRepositoryPort>) -> Self {
        Self { product_repo }
    }

    pub async fn handle(&self, command: CreateProduct) -> Result<Product, ApplicationError> {
        let mut new_product = NewProduct::new(command.name, command.price);
        if let Some(availability) = command.availability {
            new_product = new_product.with_availability(availability);
        }

        let product = self.product_repo.create(&new_product).await?;

        tracing::info!(
            product_id = %product.id(),
            name = %product.name(),
            "Product created"
        );

        Ok(product)
    }
}

// ============================================================================
// ReplaceProduct
// ============================================================================

/// ReplaceProduct Handler
pub struct ReplaceProductHandler {
    product_repo: Arc<dyn ProductRepositoryPort>,
}

impl ReplaceProductHandler {
    pub fn new(product_repo: Arc<dyn ProductRepositoryPort>) -> Self {
        Self { product_repo }
    }

    pub async fn handle(&self, command: ReplaceProduct) -> Result<Product, ApplicationError> {
        let product_id = command.product_id;

        let mut product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, product_id))?;

        if product.apply(command.patch) {
            self.product_repo.update(&product).await?;
        }

        tracing::info!(product_id = %product_id, "Product updated");

        Ok(product)
    }
}

// ============================================================================
// ToggleAvailability
// ============================================================================

/// ToggleAvailability Handler
pub struct ToggleAvailabilityHandler {
    product_repo: Arc<dyn ProductRepositoryPort>,
}

impl ToggleAvailabilityHandler {
    pub fn new(product_repo: Arc<dyn ProductRepositoryPort>) -> Self {
        Self { product_repo }
    }

    pub async fn handle(&self, command: ToggleAvailability) -> Result<Product, ApplicationError> {
        let product_id = command.product_id;

        let mut product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, product_id))?;

        product.toggle_availability();
        self.product_repo.update(&product).await?;

        tracing::info!(
            product_id = %product_id,
            availability = product.availability(),
            "Product availability toggled"
        );

        Ok(product)
    }
}

// ============================================================================
// DeleteProduct
// ============================================================================

/// DeleteProduct Handler
pub struct DeleteProductHandler {
    product_repo: Arc<dyn ProductRepositoryPort>,
}

impl DeleteProductHandler {
    pub fn new(product_repo: Arc<dyn ProductRepositoryPort>) -> Self {
        Self { product_repo }
    }

    pub async fn handle(&self, command: DeleteProduct) -> Result<(), ApplicationError> {
        let product_id = command.product_id;

        // 检查商品是否存在
        let product = self
            .product_repo
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(RESOURCE, product_id))?;

        self.product_repo.delete(product_id).await?;

        tracing::info!(
            product_id = %product_id,
            name = %product.name(),
            "Product deleted"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{InMemoryProductRepository, RepositoryError};
    use crate::domain::product::{Price, ProductId, ProductName, ProductPatch};
    use async_trait::async_trait;

    /// 在写回之前删除目标行，模拟并发 DELETE
    #[derive(Default)]
    struct DeletedBeforeUpdate {
        inner: InMemoryProductRepository,
    }

    #[async_trait]
    impl ProductRepositoryPort for DeletedBeforeUpdate {
        async fn find_all(&self) -> Result<Vec<Product>, RepositoryError> {
            self.inner.find_all().await
        }

        async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
            self.inner.find_by_id(id).await
        }

        async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError> {
            self.inner.create(product).await
        }

        async fn update(&self, product: &Product) -> Result<(), RepositoryError> {
            self.inner.delete(product.id()).await?;
            self.inner.update(product).await
        }

        async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
            self.inner.delete(id).await
        }
    }

    fn repo() -> Arc<dyn ProductRepositoryPort> {
        Arc::new(InMemoryProductRepository::default())
    }

    fn create_command(name: &str, price: f64) -> CreateProduct {
        CreateProduct {
            name: ProductName::new(name).unwrap(),
            price: Price::new(price).unwrap(),
            availability: None,
        }
    }

    #[tokio::test]
    async fn test_create_defaults_availability_to_true() {
        let handler = CreateProductHandler::new(repo());
        let product = handler.handle(create_command("Mouse", 50.0)).await.unwrap();

        assert_eq!(product.id(), ProductId::new(1));
        assert!(product.availability());
    }

    #[tokio::test]
    async fn test_create_honours_explicit_availability() {
        let handler = CreateProductHandler::new(repo());
        let mut command = create_command("Mouse", 50.0);
        command.availability = Some(false);

        let product = handler.handle(command).await.unwrap();
        assert!(!product.availability());
    }

    #[tokio::test]
    async fn test_replace_missing_product_is_not_found() {
        let handler = ReplaceProductHandler::new(repo());
        let command = ReplaceProduct {
            product_id: ProductId::new(1000),
            patch: ProductPatch::default(),
        };

        let err = handler.handle(command).await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_replace_persists_changes() {
        let repo = repo();
        let created = CreateProductHandler::new(repo.clone())
            .handle(create_command("Mouse", 50.0))
            .await
            .unwrap();

        let command = ReplaceProduct {
            product_id: created.id(),
            patch: ProductPatch::replace(
                ProductName::new("Mouse - Testing").unwrap(),
                Price::new(300.0).unwrap(),
                false,
            ),
        };
        ReplaceProductHandler::new(repo.clone())
            .handle(command)
            .await
            .unwrap();

        let stored = repo.find_by_id(created.id()).await.unwrap().unwrap();
        assert_eq!(stored.name().as_str(), "Mouse - Testing");
        assert_eq!(stored.price().value(), 300.0);
        assert!(!stored.availability());
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_availability() {
        let repo = repo();
        let created = CreateProductHandler::new(repo.clone())
            .handle(create_command("Mouse", 50.0))
            .await
            .unwrap();
        let handler = ToggleAvailabilityHandler::new(repo.clone());

        let first = handler
            .handle(ToggleAvailability { product_id: created.id() })
            .await
            .unwrap();
        let second = handler
            .handle(ToggleAvailability { product_id: created.id() })
            .await
            .unwrap();

        assert!(!first.availability());
        assert!(second.availability());
    }

    #[tokio::test]
    async fn test_delete_removes_product() {
        let repo = repo();
        let created = CreateProductHandler::new(repo.clone())
            .handle(create_command("Mouse", 50.0))
            .await
            .unwrap();
        let handler = DeleteProductHandler::new(repo.clone());

        handler
            .handle(DeleteProduct { product_id: created.id() })
            .await
            .unwrap();
        assert!(repo.find_by_id(created.id()).await.unwrap().is_none());

        let err = handler
            .handle(DeleteProduct { product_id: created.id() })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_toggle_row_deleted_before_write_is_not_found() {
        let repo: Arc<dyn ProductRepositoryPort> = Arc::new(DeletedBeforeUpdate::default());
        let created = CreateProductHandler::new(repo.clone())
            .handle(create_command("Mouse", 50.0))
            .await
            .unwrap();

        let err = ToggleAvailabilityHandler::new(repo)
            .handle(ToggleAvailability { product_id: created.id() })
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound { id, .. } if id == created.id()));
    }
}
