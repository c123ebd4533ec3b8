//! HTTP Layer - RESTful API
//!
//! 商品 CRUD 接口、请求校验、跨域限制和 OpenAPI 文档

pub mod cors;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

pub use cors::CorsPolicy;
pub use error::ApiError;
pub use openapi::ApiDoc;
pub use routes::create_routes;
pub use server::{build_app, HttpServer, ServerConfig};
pub use state::AppState;
