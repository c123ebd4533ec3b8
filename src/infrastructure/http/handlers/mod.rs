//! HTTP Handlers

pub mod product;

pub use product::*;
