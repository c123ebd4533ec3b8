//! Query Handlers

mod product_handlers;

pub use product_handlers::*;
