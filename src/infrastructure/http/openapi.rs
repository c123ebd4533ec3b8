//! OpenAPI 文档
//!
//! `/docs` 返回 Swagger UI 页面，`/docs/openapi.json` 返回生成的文档。

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use super::dto::{
    CreateProductRequest, ErrorResponse, ProductRecordResponse, ProductResponse,
    UpdateProductRequest, ValidationErrorResponse,
};
use super::handlers::product;
use super::state::AppState;
use super::validation::{FieldError, Location};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "REST API Node.js / Express / TypeScript",
        version = "1.0.0",
        description = "API Docs for Products"
    ),
    paths(
        product::list_products,
        product::create_product,
        product::get_product,
        product::update_product,
        product::update_availability,
        product::delete_product,
    ),
    components(schemas(
        ProductResponse,
        ProductRecordResponse,
        CreateProductRequest,
        UpdateProductRequest,
        ErrorResponse,
        ValidationErrorResponse,
        FieldError,
        Location,
    )),
    tags(
        (name = "Products", description = "API operations related to products")
    )
)]
pub struct ApiDoc;

const SWAGGER_UI_HTML: &str = r##"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Documentación REST API Express / TypeScript</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>.topbar { background-color: #2b3b45; }</style>
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
    <script>
      window.onload = () => {
        window.ui = SwaggerUIBundle({ url: "/docs/openapi.json", dom_id: "#swagger-ui" });
      };
    </script>
  </body>
</html>"##;

async fn serve_swagger_ui() -> impl IntoResponse {
    Html(SWAGGER_UI_HTML)
}

async fn serve_openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// 文档路由
pub fn docs_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/docs", get(serve_swagger_ui))
        .route("/docs/openapi.json", get(serve_openapi))
}
