//! 分类接口

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_errors::AppResult;
use serde::Deserialize;

use crate::api::http::extract::{ApiJson, ApiPath};
use crate::api::http::response::ApiResponse;
use crate::api::http::state::AppState;
use crate::application::commands::{CreateCategoryCommand, UpdateCategoryCommand};
use crate::domain::value_objects::CategoryId;

/// 分类请求体
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CategoryRequest>,
) -> AppResult<Response> {
    let id = state
        .categories
        .create_category(CreateCategoryCommand {
            name: body.name,
            parent_id: body.parent_id,
        })
        .await?;
    Ok(ApiResponse::created(id))
}

/// GET /api/v1/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = state.categories.list_categories().await?;
    Ok(ApiResponse::success(categories))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CategoryId>,
) -> AppResult<impl IntoResponse> {
    let category = state.categories.get_category(id).await?;
    Ok(ApiResponse::success(category))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CategoryId>,
    ApiJson(body): ApiJson<CategoryRequest>,
) -> AppResult<StatusCode> {
    state
        .categories
        .update_category(UpdateCategoryCommand {
            id,
            name: body.name,
            parent_id: body.parent_id,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CategoryId>,
) -> AppResult<StatusCode> {
    state.categories.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
