//! Product Queries

use crate::domain::product::ProductId;

/// 获取商品详情查询
#[derive(Debug, Clone)]
pub struct GetProduct {
    pub product_id: ProductId,
}

/// 列出所有商品查询
#[derive(Debug, Clone)]
pub struct ListProducts;
