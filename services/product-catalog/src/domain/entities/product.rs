//! 商品聚合

use catalog_common::Pagination;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Category, NewVariant, Variant};
use crate::domain::enums::ProductStatus;
use crate::domain::value_objects::{CategoryId, ImageId, ProductId};

/// 商品图片，`sort_order` 决定展示顺序（允许重复）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: ImageId,
    pub product_id: ProductId,
    pub url: String,
    pub sort_order: i32,
}

/// 列表视图：不含规格
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub status: ProductStatus,
    pub category_ids: Vec<CategoryId>,
    pub images: Vec<ProductImage>,
}

/// 详情视图：分类带名称，包含规格及其选项和单位
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub status: ProductStatus,
    pub categories: Vec<Category>,
    pub images: Vec<ProductImage>,
    pub variants: Vec<Variant>,
}

impl ProductDetail {
    pub fn category_ids(&self) -> Vec<CategoryId> {
        self.categories.iter().map(|c| c.id).collect()
    }
}

/// 待创建图片
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewProductImage {
    pub url: String,
    pub sort_order: i32,
}

/// 待创建商品，状态固定为 active
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category_ids: Vec<CategoryId>,
    pub images: Vec<NewProductImage>,
    pub variants: Vec<NewVariant>,
}

/// 更新时提交的图片：有 id 的是已有图片，没有 id 的是新增图片
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageRevision {
    #[serde(default)]
    pub id: Option<ImageId>,
    pub url: String,
    pub sort_order: i32,
}

/// 商品更新
///
/// 规格只在创建时写入，更新不触及规格。
/// `images` 为空表示图片不变，而不是清空。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub status: Option<ProductStatus>,
    pub category_ids: Vec<CategoryId>,
    pub images: Vec<ImageRevision>,
}

/// 商品列表过滤条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// 名称子串，大小写不敏感
    pub keyword: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    /// 未指定 `status` 时排除 archived
    pub exclude_archived: bool,
    pub pagination: Pagination,
}
