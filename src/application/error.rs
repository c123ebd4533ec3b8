//! 应用层错误定义

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::product::ProductId;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: ProductId,
    },

    /// 存储不可用等基础设施错误
    #[error("Repository error: {0}")]
    Repository(String),
}

impl ApplicationError {
    pub fn not_found(resource_type: &'static str, id: ProductId) -> Self {
        Self::NotFound { resource_type, id }
    }
}

// 查找之后行被并发删除时，仓储的 NotFound 仍然是未找到
impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => Self::not_found("Product", id),
            other => Self::Repository(other.to_string()),
        }
    }
}
