//! 商品接口

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use catalog_errors::{AppError, AppResult};
use serde::Deserialize;
use tracing::debug;

use crate::api::http::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::http::multipart::{discard_uploads, malformed, store_file, text};
use crate::api::http::response::ApiResponse;
use crate::api::http::state::AppState;
use crate::application::commands::{CreateProductCommand, UpdateProductCommand};
use crate::application::queries::ListProductsQuery;
use crate::domain::entities::{ImageRevision, NewProductImage, NewVariant};
use crate::domain::enums::ProductStatus;
use crate::domain::value_objects::{CategoryId, ImageId, ProductId};

/// 商品列表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct ListProductsParams {
    pub keyword: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl From<ListProductsParams> for ListProductsQuery {
    fn from(params: ListProductsParams) -> Self {
        Self {
            keyword: params.keyword,
            category_id: params.category_id,
            status: params.status,
            limit: params.limit,
            offset: params.offset,
        }
    }
}

/// 更新商品请求体
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<ProductStatus>,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    #[serde(default)]
    pub images: Vec<ImageRevision>,
}

/// 解析创建表单
///
/// 图片按出现顺序上传，排序号从 1 开始；已上传的路径记录在 `uploaded` 中以便失败时清理。
async fn read_create_form(
    state: &AppState,
    multipart: &mut Multipart,
    uploaded: &mut Vec<String>,
) -> AppResult<CreateProductCommand> {
    let mut cmd = CreateProductCommand {
        name: String::new(),
        description: String::new(),
        category_ids: Vec::new(),
        images: Vec::new(),
        variants: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => cmd.name = text(field).await?,
            "description" => cmd.description = text(field).await?,
            "category_id" => {
                let raw = text(field).await?;
                let id = raw.trim().parse::<i64>().map_err(|_| {
                    AppError::bad_request(format!("Invalid category_id: {}", raw))
                })?;
                cmd.category_ids.push(CategoryId(id));
            }
            "variants" => {
                let raw = text(field).await?;
                cmd.variants = serde_json::from_str::<Vec<NewVariant>>(&raw)
                    .map_err(|e| AppError::bad_request(format!("Invalid variants: {}", e)))?;
            }
            "images" if field.file_name().is_none_or(str::is_empty) => {
                debug!("Skipping image field without a filename");
            }
            "images" => {
                let url = store_file(state.images.as_ref(), field).await?;
                uploaded.push(url.clone());
                cmd.images.push(NewProductImage {
                    url,
                    sort_order: uploaded.len() as i32,
                });
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(cmd)
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    let mut uploaded = Vec::new();

    let result = match read_create_form(&state, &mut multipart, &mut uploaded).await {
        Ok(cmd) => state.products.create_product(cmd).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(id) => Ok(ApiResponse::created(id)),
        Err(e) => {
            discard_uploads(state.images.as_ref(), &uploaded).await;
            Err(e)
        }
    }
}

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListProductsParams>,
) -> AppResult<impl IntoResponse> {
    let products = state.products.list_products(params.into()).await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/v1/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> AppResult<impl IntoResponse> {
    let product = state.products.get_product(id).await?;
    Ok(ApiResponse::success(product))
}

/// PUT /api/v1/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
    ApiJson(body): ApiJson<UpdateProductRequest>,
) -> AppResult<StatusCode> {
    state
        .products
        .update_product(UpdateProductCommand {
            id,
            name: body.name,
            description: body.description,
            status: body.status,
            category_ids: body.category_ids,
            images: body.images,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> AppResult<StatusCode> {
    state.products.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/products/images/{id}
pub async fn get_product_image(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ImageId>,
) -> AppResult<Redirect> {
    let url = state.products.get_product_image(id).await?;
    Ok(Redirect::temporary(&format!(
        "/{}",
        url.trim_start_matches('/')
    )))
}
