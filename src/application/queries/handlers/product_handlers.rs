//! Product Query Handlers

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::ProductRepositoryPort;
use crate::application::queries::{GetProduct, ListProducts};
use crate::domain::product::Product;

/// GetProduct Handler
pub struct GetProductHandler {
    product_repo: Arc<dyn ProductRepositoryPort>,
}

impl GetProductHandler {
    pub fn new(product_repo: Arc<dyn ProductRepositoryPort>) -> Self {
        Self { product_repo }
    }

    pub async fn handle(&self, query: GetProduct) -> Result<Product, ApplicationError> {
        self.product_repo
            .find_by_id(query.product_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Product", query.product_id))
    }
}

/// ListProducts Handler
pub struct ListProductsHandler {
    product_repo: Arc<dyn ProductRepositoryPort>,
}

impl ListProductsHandler {
    pub fn new(product_repo: Arc<dyn ProductRepositoryPort>) -> Self {
        Self { product_repo }
    }

    pub async fn handle(&self, _query: ListProducts) -> Result<Vec<Product>, ApplicationError> {
        Ok(self.product_repo.find_all().await?)
    }
}
