//! CORS Policy
//!
//! 只允许一个配置好的前端来源：
//! - `CorsLayer` 负责预检和响应头
//! - `enforce_allowed_origin` 直接拒绝来源不匹配的请求
//!
//! 不带 Origin 头的请求（同源、命令行工具）直接放行。

use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::{
        header::{CONTENT_TYPE, ORIGIN},
        HeaderValue, Method,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::error::ApiError;

pub const NOT_ALLOWED_BY_CORS: &str = "Not allowed by CORS";

/// 跨域策略
#[derive(Debug, Clone, Default)]
pub struct CorsPolicy {
    allowed_origin: Option<HeaderValue>,
}

impl CorsPolicy {
    /// 无效的来源会被忽略，此时拒绝所有跨域请求
    pub fn new(front_end_url: Option<&str>) -> Self {
        let allowed_origin = front_end_url.and_then(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        });
        Self { allowed_origin }
    }

    pub fn allowed_origin(&self) -> Option<&HeaderValue> {
        self.allowed_origin.as_ref()
    }

    pub fn is_allowed(&self, origin: &HeaderValue) -> bool {
        self.allowed_origin.as_ref() == Some(origin)
    }

    /// 构建 tower-http CORS 层
    pub fn layer(&self) -> CorsLayer {
        let allow_origin = match &self.allowed_origin {
            Some(origin) => AllowOrigin::exact(origin.clone()),
            None => AllowOrigin::list(Vec::<HeaderValue>::new()),
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
            ])
            .allow_headers([CONTENT_TYPE])
            .max_age(Duration::from_secs(3600))
    }
}

/// 拒绝来源不匹配的跨域请求
pub async fn enforce_allowed_origin(
    State(policy): State<CorsPolicy>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        if !policy.is_allowed(origin) {
            tracing::warn!(
                origin = ?origin,
                method = %request.method(),
                uri = %request.uri(),
                "Rejected by CORS"
            );
            return ApiError::Forbidden(NOT_ALLOWED_BY_CORS.to_string()).into_response();
        }
        tracing::debug!(origin = ?origin, "Allowed by CORS");
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header::ACCESS_CONTROL_ALLOW_ORIGIN, Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    const FRONT_END: &str = "http://localhost:5173";

    fn create_test_router(policy: CorsPolicy) -> Router {
        Router::new()
            .route("/ok", get(|| async { "OK" }))
            .layer(policy.layer())
            .layer(axum::middleware::from_fn_with_state(
                policy,
                enforce_allowed_origin,
            ))
    }

    fn request(origin: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/ok");
        if let Some(origin) = origin {
            builder = builder.header(ORIGIN, origin);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_configured_origin_is_allowed() {
        let app = create_test_router(CorsPolicy::new(Some(FRONT_END)));
        let response = app.oneshot(request(Some(FRONT_END))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            FRONT_END
        );
    }

    #[tokio::test]
    async fn test_foreign_origin_is_rejected() {
        let app = create_test_router(CorsPolicy::new(Some(FRONT_END)));
        let response = app
            .oneshot(request(Some("http://evil.example")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_request_without_origin_passes() {
        let app = create_test_router(CorsPolicy::new(Some(FRONT_END)));
        let response = app.oneshot(request(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unset_origin_rejects_cross_origin_requests() {
        let app = create_test_router(CorsPolicy::default());
        let response = app.oneshot(request(Some(FRONT_END))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_invalid_origin_is_ignored() {
        let policy = CorsPolicy::new(Some("http://bad\norigin"));
        assert!(policy.allowed_origin().is_none());
    }
}
