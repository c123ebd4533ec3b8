//! HTTP Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{ErrorResponse, ValidationErrorResponse};
use super::validation::FieldError;
use crate::application::ApplicationError;

/// 商品不存在时的固定消息
pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 字段校验失败（400，`errors` 列表）
    Validation(Vec<FieldError>),
    BadRequest(String),
    NotFound(String),
    Forbidden(String),
    /// 请求体超过大小限制（413）
    PayloadTooLarge(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn product_not_found() -> Self {
        Self::NotFound(PRODUCT_NOT_FOUND.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                tracing::warn!(count = errors.len(), "Request validation failed");
                (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorResponse { errors }),
                )
                    .into_response()
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::NotFound(msg) => {
                tracing::warn!(error = %msg, "Resource not found");
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!(error = %msg, "Forbidden");
                (StatusCode::FORBIDDEN, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::PayloadTooLarge(msg) => {
                tracing::warn!(error = %msg, "Payload too large");
                (StatusCode::PAYLOAD_TOO_LARGE, Json(ErrorResponse::new(msg))).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::new(msg)),
                )
                    .into_response()
            }
        }
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound { .. } => ApiError::product_not_found(),
            ApplicationError::Repository(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductId;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::Validation(Vec::new()), StatusCode::BAD_REQUEST),
            (ApiError::bad_request("bad"), StatusCode::BAD_REQUEST),
            (ApiError::product_not_found(), StatusCode::NOT_FOUND),
            (ApiError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (ApiError::PayloadTooLarge("big".into()), StatusCode::PAYLOAD_TOO_LARGE),
            (ApiError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_application_not_found_maps_to_fixed_message() {
        let error = ApiError::from(ApplicationError::not_found("Product", ProductId::new(7)));
        match error {
            ApiError::NotFound(msg) => assert_eq!(msg, PRODUCT_NOT_FOUND),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_repository_error_maps_to_internal() {
        let error = ApiError::from(ApplicationError::Repository("db down".into()));
        assert!(matches!(error, ApiError::Internal(_)));
    }
}
