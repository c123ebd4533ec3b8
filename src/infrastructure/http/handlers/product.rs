//! Product HTTP Handlers
//!
//! 每个处理器先执行路由的规则集合，校验失败时直接返回 400，
//! 不会触达仓储。

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use crate::application::{DeleteProduct, GetProduct, ListProducts, ToggleAvailability};
use crate::domain::product::ProductId;
use crate::infrastructure::http::dto::{
    CreateProductRequest, DataResponse, ErrorResponse, ProductRecordResponse, ProductResponse,
    UpdateProductRequest, ValidationErrorResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::JsonBody;
use crate::infrastructure::http::state::AppState;
use crate::infrastructure::http::validation::{
    create_product_rules, id_params, product_id_rules, update_product_rules,
};

/// 删除成功时的固定消息
pub const PRODUCT_DELETED: &str = "Producto eliminado";

/// 校验通过后解析主键；数值形式但不可能存在的 id 视为未找到
fn resolve_id(raw: &str) -> Result<ProductId, ApiError> {
    ProductId::parse(raw).ok_or_else(ApiError::product_not_found)
}

/// 获取商品列表
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    summary = "Get a list of products",
    description = "Returns a list of products",
    responses(
        (status = 200, description = "Successful response", body = DataResponse<Vec<ProductResponse>>)
    )
)]
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<ProductResponse>>>, ApiError> {
    let products = state.list_products_handler.handle(ListProducts).await?;

    Ok(Json(DataResponse::new(
        products.iter().map(ProductResponse::from).collect(),
    )))
}

/// 创建商品
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    summary = "Create a new product",
    description = "Creates a new product",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created successfully", body = DataResponse<ProductRecordResponse>),
        (status = 400, description = "Bad request - Invalid input data", body = ValidationErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<DataResponse<ProductRecordResponse>>), ApiError> {
    create_product_rules().validate(&Value::Null, &body)?;

    let command = CreateProductRequest::from_validated(&body).into_command()?;
    let product = state.create_product_handler.handle(command).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(ProductRecordResponse::from(&product))),
    ))
}

/// 获取商品详情
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Get a product by id",
    description = "Returns a product based on its unique ID",
    params(("id" = i64, Path, description = "The ID of the product to retrieve")),
    responses(
        (status = 200, description = "Successful response", body = DataResponse<ProductResponse>),
        (status = 400, description = "Bad request - Invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<ProductResponse>>, ApiError> {
    product_id_rules().validate(&id_params(&id), &Value::Null)?;

    let product_id = resolve_id(&id)?;
    let product = state
        .get_product_handler
        .handle(GetProduct { product_id })
        .await?;

    Ok(Json(DataResponse::new(ProductResponse::from(&product))))
}

/// 替换商品全部可变字段
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Updates a product with user inputs",
    description = "Updates a product with user inputs",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Successful response", body = DataResponse<ProductRecordResponse>),
        (status = 400, description = "Bad request - Invalid ID or invalid input data", body = ValidationErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<Json<DataResponse<ProductRecordResponse>>, ApiError> {
    update_product_rules().validate(&id_params(&id), &body)?;

    let product_id = resolve_id(&id)?;
    let command = UpdateProductRequest::from_validated(&body)?.into_command(product_id)?;
    let product = state.replace_product_handler.handle(command).await?;

    Ok(Json(DataResponse::new(ProductRecordResponse::from(
        &product,
    ))))
}

/// 切换商品可用性（忽略请求体）
#[utoipa::path(
    patch,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Update product availability",
    description = "Toggles the availability and returns the updated product",
    params(("id" = i64, Path, description = "The ID of the product to update")),
    responses(
        (status = 200, description = "Successful response", body = DataResponse<ProductRecordResponse>),
        (status = 400, description = "Bad request - Invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<ProductRecordResponse>>, ApiError> {
    product_id_rules().validate(&id_params(&id), &Value::Null)?;

    let product_id = resolve_id(&id)?;
    let product = state
        .toggle_availability_handler
        .handle(ToggleAvailability { product_id })
        .await?;

    Ok(Json(DataResponse::new(ProductRecordResponse::from(
        &product,
    ))))
}

/// 删除商品
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    summary = "Delete a product by unique id",
    description = "Deletes the product and returns a confirmation message",
    params(("id" = i64, Path, description = "The ID of the product to delete")),
    responses(
        (status = 200, description = "Successful response", body = DataResponse<String>, example = json!({"data": "Producto eliminado"})),
        (status = 400, description = "Bad request - Invalid ID", body = ValidationErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<&'static str>>, ApiError> {
    product_id_rules().validate(&id_params(&id), &Value::Null)?;

    let product_id = resolve_id(&id)?;
    state
        .delete_product_handler
        .handle(DeleteProduct { product_id })
        .await?;

    Ok(Json(DataResponse::new(PRODUCT_DELETED)))
}
