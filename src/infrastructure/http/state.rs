//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateProductHandler, DeleteProductHandler, ReplaceProductHandler, ToggleAvailabilityHandler,
    // Query handlers
    GetProductHandler, ListProductsHandler,
    ProductRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Command Handlers ==========
    pub create_product_handler: CreateProductHandler,
    pub replace_product_handler: ReplaceProductHandler,
    pub toggle_availability_handler: ToggleAvailabilityHandler,
    pub delete_product_handler: DeleteProductHandler,

    // ========== Query Handlers ==========
    pub get_product_handler: GetProductHandler,
    pub list_products_handler: ListProductsHandler,
}

impl AppState {
    /// 所有处理器共享同一个仓储
    pub fn new(product_repo: Arc<dyn ProductRepositoryPort>) -> Self {
        Self {
            // Command handlers
            create_product_handler: CreateProductHandler::new(product_repo.clone()),
            replace_product_handler: ReplaceProductHandler::new(product_repo.clone()),
            toggle_availability_handler: ToggleAvailabilityHandler::new(product_repo.clone()),
            delete_product_handler: DeleteProductHandler::new(product_repo.clone()),

            // Query handlers
            get_product_handler: GetProductHandler::new(product_repo.clone()),
            list_products_handler: ListProductsHandler::new(product_repo),
        }
    }
}
