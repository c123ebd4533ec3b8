//! Product Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Price, ProductId, ProductName};

/// Product 聚合根
///
/// 不变量:
/// - id 一旦分配不可修改
/// - name 非空，price > 0（由值对象保证）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: ProductName,
    price: Price,
    availability: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// 从持久化数据重建
    pub fn restore(
        id: ProductId,
        name: ProductName,
        price: Price,
        availability: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            price,
            availability,
            created_at,
            updated_at,
        }
    }

    /// 逐字段应用变更，返回是否有字段被设置
    pub fn apply(&mut self, patch: ProductPatch) -> bool {
        if patch.is_empty() {
            return false;
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(availability) = patch.availability {
            self.availability = availability;
        }
        self.updated_at = Utc::now();
        true
    }

    /// 反转可用性
    pub fn toggle_availability(&mut self) {
        self.availability = !self.availability;
        self.updated_at = Utc::now();
    }

    // Getters
    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn availability(&self) -> bool {
        self.availability
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// 待创建的商品（尚未分配 id）
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: ProductName,
    pub price: Price,
    pub availability: bool,
}

impl NewProduct {
    /// 默认可用
    pub fn new(name: ProductName, price: Price) -> Self {
        Self {
            name,
            price,
            availability: true,
        }
    }

    pub fn with_availability(mut self, availability: bool) -> Self {
        self.availability = availability;
        self
    }
}

/// 商品字段变更
///
/// None 表示该字段保持不变
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<ProductName>,
    pub price: Option<Price>,
    pub availability: Option<bool>,
}

impl ProductPatch {
    /// 替换全部可变字段（PUT 语义）
    pub fn replace(name: ProductName, price: Price, availability: bool) -> Self {
        Self {
            name: Some(name),
            price: Some(price),
            availability: Some(availability),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.availability.is_none()
    }
}
