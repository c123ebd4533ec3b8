//! Product Context - 商品限界上下文
//!
//! 职责:
//! - 商品聚合（名称、价格、可用性）
//! - 显式的字段级变更（ProductPatch）

mod aggregate;
mod value_objects;

pub use aggregate::{NewProduct, Product, ProductPatch};
pub use value_objects::{Price, ProductId, ProductName};
