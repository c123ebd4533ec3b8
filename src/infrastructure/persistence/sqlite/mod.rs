//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod product_repo;

pub use database::*;
pub use product_repo::*;
