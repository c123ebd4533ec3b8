//! HTTP Routes
//!
//! API Endpoints（末尾斜杠同样匹配）:
//! - /api/products       GET     列出所有商品
//! - /api/products       POST    创建商品
//! - /api/products/:id   GET     获取商品详情
//! - /api/products/:id   PUT     替换商品
//! - /api/products/:id   PATCH   切换可用性
//! - /api/products/:id   DELETE  删除商品
//! - /docs                GET     Swagger UI
//! - /docs/openapi.json   GET     OpenAPI 文档

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::openapi::docs_routes;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().merge(product_routes()).merge(docs_routes())
}

/// Product 路由
fn product_routes() -> Router<Arc<AppState>> {
    let collection = get(handlers::list_products).post(handlers::create_product);
    let member = get(handlers::get_product)
        .put(handlers::update_product)
        .patch(handlers::update_availability)
        .delete(handlers::delete_product);

    Router::new()
        .route("/api/products", collection.clone())
        .route("/api/products/", collection)
        .route("/api/products/:id", member.clone())
        .route("/api/products/:id/", member)
}
