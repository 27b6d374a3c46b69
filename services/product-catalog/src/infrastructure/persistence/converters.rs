//! 行结构到领域实体的转换

use catalog_errors::{AppError, AppResult};

use super::rows::{
    CategoryRow, ImageRow, ProductSummaryRow, VariantOptionRow, VariantRow, VariantUnitRow,
};
use crate::domain::entities::{
    Category, ProductImage, ProductSummary, Variant, VariantOption, VariantUnit,
};
use crate::domain::enums::ProductStatus;
use crate::domain::value_objects::{CategoryId, ImageId, ProductId, UnitId, VariantId};

pub fn parse_status(raw: &str) -> AppResult<ProductStatus> {
    raw.parse()
        .map_err(|e| AppError::internal(format!("Corrupt product row: {}", e)))
}

impl From<ImageRow> for ProductImage {
    fn from(row: ImageRow) -> Self {
        Self {
            id: ImageId(row.id),
            product_id: ProductId(row.product_id),
            url: row.url,
            sort_order: row.sort_order,
        }
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId(row.id),
            name: row.name,
            parent_id: row.parent_id.map(CategoryId),
        }
    }
}

impl From<VariantOptionRow> for VariantOption {
    fn from(row: VariantOptionRow) -> Self {
        Self {
            name: row.name,
            value: row.value,
        }
    }
}

impl From<VariantUnitRow> for VariantUnit {
    fn from(row: VariantUnitRow) -> Self {
        Self {
            id: UnitId(row.id),
            variant_id: VariantId(row.variant_id),
            name: row.name,
            sku: row.sku,
            barcode: row.barcode,
            conversion_rate: row.conversion_rate,
            price: row.price,
        }
    }
}

pub fn variant_from_rows(
    row: VariantRow,
    options: Vec<VariantOptionRow>,
    units: Vec<VariantUnitRow>,
) -> Variant {
    Variant {
        id: VariantId(row.id),
        product_id: ProductId(row.product_id),
        sku: row.sku,
        options: options.into_iter().map(Into::into).collect(),
        base_unit: row.base_unit,
        stock: row.stock,
        cost_price: row.cost_price,
        units: units.into_iter().map(Into::into).collect(),
    }
}

impl TryFrom<ProductSummaryRow> for ProductSummary {
    type Error = AppError;

    fn try_from(row: ProductSummaryRow) -> AppResult<Self> {
        Ok(Self {
            id: ProductId(row.id),
            status: parse_status(&row.status)?,
            name: row.name,
            description: row.description,
            category_ids: row.category_ids.into_iter().map(CategoryId).collect(),
            images: row.images.0.into_iter().map(Into::into).collect(),
        })
    }
}
