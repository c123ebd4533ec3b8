//! Data Transfer Objects

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::error::ApiError;
use super::validation::{as_bool, as_number, as_text, messages, FieldError};
use crate::application::{CreateProduct, ReplaceProduct};
use crate::domain::product::{Price, Product, ProductId, ProductName, ProductPatch};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 成功响应 `{ "data": ... }`
#[derive(Debug, Serialize, ToSchema)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// 错误响应 `{ "error": "..." }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Producto no encontrado")]
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// 校验失败响应 `{ "errors": [...] }`
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

// ============================================================================
// Product DTOs
// ============================================================================

/// 商品（列表与详情视图，不含审计时间戳）
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductResponse {
    /// The Product ID
    #[schema(example = 1)]
    pub id: i64,
    /// The Product Name
    #[schema(example = "Monitor Curvo de 40 pulgadas")]
    pub name: String,
    /// The Product Price
    #[schema(example = 300)]
    pub price: f64,
    /// The Product Availability
    #[schema(example = true)]
    pub availability: bool,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().value(),
            name: product.name().to_string(),
            price: product.price().value(),
            availability: product.availability(),
        }
    }
}

/// 商品（写操作返回，含审计时间戳）
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecordResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Monitor Curvo de 40 pulgadas")]
    pub name: String,
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
    pub created_at: String,
    pub updated_at: String,
}

fn timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl From<&Product> for ProductRecordResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().value(),
            name: product.name().to_string(),
            price: product.price().value(),
            availability: product.availability(),
            created_at: timestamp(product.created_at()),
            updated_at: timestamp(product.updated_at()),
        }
    }
}

/// 创建商品请求体
///
/// 字段在校验通过后从原始 JSON 宽松转换而来（如 `"50"` 作为价格）
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Monitor Curvo de 40 pulgadas")]
    pub name: String,
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: Option<bool>,
}

impl CreateProductRequest {
    pub fn from_validated(body: &Value) -> Self {
        Self {
            name: as_text(body.get("name")),
            price: as_number(body.get("price")),
            availability: as_bool(body.get("availability")),
        }
    }

    pub fn into_command(self) -> Result<CreateProduct, ApiError> {
        Ok(CreateProduct {
            name: ProductName::new(self.name).map_err(ApiError::bad_request)?,
            price: Price::new(self.price).map_err(ApiError::bad_request)?,
            availability: self.availability,
        })
    }
}

/// 替换商品请求体
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    #[schema(example = "Monitor Curvo de 40 pulgadas")]
    pub name: String,
    #[schema(example = 300)]
    pub price: f64,
    #[schema(example = true)]
    pub availability: bool,
}

impl UpdateProductRequest {
    pub fn from_validated(body: &Value) -> Result<Self, ApiError> {
        Ok(Self {
            name: as_text(body.get("name")),
            price: as_number(body.get("price")),
            availability: as_bool(body.get("availability"))
                .ok_or_else(|| ApiError::bad_request(messages::AVAILABILITY_INVALID))?,
        })
    }

    pub fn into_command(self, product_id: ProductId) -> Result<ReplaceProduct, ApiError> {
        Ok(ReplaceProduct {
            product_id,
            patch: ProductPatch::replace(
                ProductName::new(self.name).map_err(ApiError::bad_request)?,
                Price::new(self.price).map_err(ApiError::bad_request)?,
                self.availability,
            ),
        })
    }
}
