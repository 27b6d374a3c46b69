//! 商品规格及其选项、换算单位

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProductId, UnitId, VariantId};

/// 规格选项，例如 `color=red`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    pub name: String,
    pub value: String,
}

/// 规格
///
/// `stock` 以基本单位计；`cost_price` 为最小货币单位。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    pub sku: String,
    pub options: Vec<VariantOption>,
    pub base_unit: String,
    pub stock: i32,
    pub cost_price: i64,
    pub units: Vec<VariantUnit>,
}

/// 换算单位，例如 "pack" = 12 个基本单位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantUnit {
    pub id: UnitId,
    pub variant_id: VariantId,
    pub name: String,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub conversion_rate: i32,
    pub price: i64,
}

/// 待创建的规格
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewVariant {
    pub sku: String,
    #[serde(default)]
    pub options: Vec<VariantOption>,
    pub base_unit: String,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub cost_price: i64,
    #[serde(default)]
    pub units: Vec<NewVariantUnit>,
}

/// 待创建的换算单位
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewVariantUnit {
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    pub conversion_rate: i32,
    #[serde(default)]
    pub price: i64,
}
