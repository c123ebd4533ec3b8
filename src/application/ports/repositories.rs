//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::product::{NewProduct, Product, ProductId};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Product Repository Port
#[async_trait]
pub trait ProductRepositoryPort: Send + Sync {
    /// 获取所有商品（按 id 升序）
    async fn find_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// 根据主键查找商品
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// 插入新商品，返回分配了 id 的完整记录
    async fn create(&self, product: &NewProduct) -> Result<Product, RepositoryError>;

    /// 持久化全部可变字段
    async fn update(&self, product: &Product) -> Result<(), RepositoryError>;

    /// 删除商品
    async fn delete(&self, id: ProductId) -> Result<(), RepositoryError>;
}
