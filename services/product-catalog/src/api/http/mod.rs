//! HTTP 投递层

mod extract;
mod handlers;
mod i18n;
mod multipart;
mod response;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::header::{ACCEPT, ACCEPT_ENCODING, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use catalog_config::{AppConfig, CorsConfig};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

pub use i18n::Translator;
pub use response::ApiResponse;
pub use state::AppState;

use handlers::{categories, images, products};

/// 投递层设置
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub max_upload_bytes: usize,
    /// 静态图片的 URL 前缀，不含首尾 `/`
    pub public_prefix: String,
    /// 静态图片的物理目录
    pub public_dir: PathBuf,
    pub cors: CorsConfig,
    pub default_lang: String,
}

impl HttpSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let public_prefix = config.storage.public_prefix.trim_matches('/').to_string();
        Self {
            max_upload_bytes: config.storage.max_upload_bytes,
            public_dir: PathBuf::from(&config.storage.root).join(&public_prefix),
            public_prefix,
            cors: config.cors.clone(),
            default_lang: config.i18n.default_lang.clone(),
        }
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = if config.allows_any_origin() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(config.allowed_origins.iter().filter_map(|origin| {
            origin
                .parse::<HeaderValue>()
                .inspect_err(|_| warn!(%origin, "Ignoring invalid CORS origin"))
                .ok()
        }))
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            CONTENT_LENGTH,
            ACCEPT_ENCODING,
            AUTHORIZATION,
        ])
}

async fn welcome() -> Json<Value> {
    Json(json!({ "message": "Welcome to Product Catalog" }))
}

/// 业务路由
fn api_routes(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route(
            "/products",
            post(products::create_product).get(products::list_products),
        )
        .route("/products/images/{id}", get(products::get_product_image))
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/images", post(images::upload_image))
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route(
            "/categories/{id}",
            get(categories::get_category)
                .put(categories::update_category)
                .delete(categories::delete_category),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
}

/// 构建完整路由：业务接口、静态图片、错误本地化、请求追踪和跨域
pub fn router(state: AppState, settings: &HttpSettings) -> Router {
    let translator = Arc::new(Translator::new(&settings.default_lang));

    Router::new()
        .route("/", get(welcome))
        .nest("/api/v1", api_routes(state, settings.max_upload_bytes))
        .nest_service(
            &format!("/{}", settings.public_prefix),
            ServeDir::new(&settings.public_dir),
        )
        .layer(middleware::from_fn_with_state(
            translator,
            i18n::localize_errors,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&settings.cors))
}
