//! Product Commands

use crate::domain::product::{Price, ProductId, ProductName, ProductPatch};

/// 创建商品命令
#[derive(Debug, Clone)]
pub struct CreateProduct {
    pub name: ProductName,
    pub price: Price,
    /// 未提供时默认为 true
    pub availability: Option<bool>,
}

/// 替换商品命令（PUT）
#[derive(Debug, Clone)]
pub struct ReplaceProduct {
    pub product_id: ProductId,
    pub patch: ProductPatch,
}

/// 切换可用性命令（PATCH）
#[derive(Debug, Clone)]
pub struct ToggleAvailability {
    pub product_id: ProductId,
}

/// 删除商品命令
#[derive(Debug, Clone)]
pub struct DeleteProduct {
    pub product_id: ProductId,
}
