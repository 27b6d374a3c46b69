//! 图片上传接口

use axum::extract::{Multipart, State};
use axum::response::Response;
use catalog_errors::{AppError, AppResult};
use serde::Serialize;

use crate::api::http::multipart::{malformed, store_file};
use crate::api::http::response::ApiResponse;
use crate::api::http::state::AppState;

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
}

/// POST /api/v1/images
///
/// 只上传不关联商品，返回的 URL 可在更新商品时引用
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Response> {
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() == Some("image") {
            let url = store_file(state.images.as_ref(), field).await?;
            return Ok(ApiResponse::created(UploadedImage { url }));
        }
    }
    Err(AppError::bad_request("Missing image field"))
}
