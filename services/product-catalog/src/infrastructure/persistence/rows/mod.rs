//! 数据库行映射结构

use serde::Deserialize;
use sqlx::FromRow;
use sqlx::types::Json;

/// 商品行
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
}

/// 列表查询行：图片以 JSONB 聚合，分类 ID 以数组聚合
#[derive(Debug, FromRow)]
pub struct ProductSummaryRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: String,
    pub category_ids: Vec<i64>,
    pub images: Json<Vec<ImageRow>>,
}

/// 商品图片行
#[derive(Debug, Clone, Deserialize, FromRow)]
pub struct ImageRow {
    pub id: i64,
    pub product_id: i64,
    pub url: String,
    pub sort_order: i32,
}

/// 分类行
#[derive(Debug, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

/// 规格行
#[derive(Debug, FromRow)]
pub struct VariantRow {
    pub id: i64,
    pub product_id: i64,
    pub sku: String,
    pub base_unit: String,
    pub stock: i32,
    pub cost_price: i64,
}

/// 规格选项行
#[derive(Debug, FromRow)]
pub struct VariantOptionRow {
    pub name: String,
    pub value: String,
}

/// 换算单位行
#[derive(Debug, FromRow)]
pub struct VariantUnitRow {
    pub id: i64,
    pub variant_id: i64,
    pub name: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub conversion_rate: i32,
    pub price: i64,
}
