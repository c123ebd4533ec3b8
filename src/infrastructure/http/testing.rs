//! 测试辅助：基于内存 SQLite 的完整应用

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use super::cors::CorsPolicy;
use super::server::build_app;
use super::state::AppState;
use crate::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig,
};
use crate::infrastructure::persistence::SqliteProductRepository;

pub async fn test_state() -> Arc<AppState> {
    let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    Arc::new(AppState::new(Arc::new(SqliteProductRepository::new(pool))))
}

pub async fn test_app() -> Router {
    build_app(test_state().await, CorsPolicy::default())
}

/// 发送请求并把响应体解析为 JSON（空响应体为 Null）
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, json)
}
