//! Product API - 商品管理 REST 服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Product Context: 商品聚合与值对象
//!
//! 应用层 (application/):
//! - Ports: ProductRepositoryPort
//! - Commands: 创建、替换、切换可用性、删除
//! - Queries: 列表、详情
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API、请求校验、CORS、OpenAPI 文档
//! - Persistence: SQLite 存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
