//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

#[cfg(test)]
mod memory;
mod repositories;

#[cfg(test)]
pub(crate) use memory::InMemoryProductRepository;
pub use repositories::{ProductRepositoryPort, RepositoryError};
