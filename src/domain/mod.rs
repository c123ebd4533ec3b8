//! Domain Layer - 领域层
//!
//! Product Context: 商品管理

pub mod product;
