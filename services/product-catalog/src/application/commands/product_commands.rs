//! 商品命令

use std::collections::HashSet;

use catalog_errors::{AppError, AppResult};

use crate::domain::entities::{
    ImageRevision, NewProduct, NewProductImage, NewVariant, ProductUpdate,
};
use crate::domain::enums::ProductStatus;
use crate::domain::value_objects::{CategoryId, ProductId};

/// 创建商品命令
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: String,
    pub category_ids: Vec<CategoryId>,
    pub images: Vec<NewProductImage>,
    pub variants: Vec<NewVariant>,
}

impl CreateProductCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_name(&self.name)?;
        for image in &self.images {
            validate_image(&image.url, image.sort_order)?;
        }
        for variant in &self.variants {
            validate_variant(variant)?;
        }
        Ok(())
    }

    pub fn into_new_product(self) -> NewProduct {
        NewProduct {
            name: self.name.trim().to_string(),
            description: self.description,
            category_ids: dedup_categories(self.category_ids),
            images: self.images,
            variants: self.variants,
        }
    }
}

/// 更新商品命令
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub status: Option<ProductStatus>,
    pub category_ids: Vec<CategoryId>,
    pub images: Vec<ImageRevision>,
}

impl UpdateProductCommand {
    pub fn validate(&self) -> AppResult<()> {
        validate_name(&self.name)?;
        for image in &self.images {
            validate_image(&image.url, image.sort_order)?;
        }
        Ok(())
    }

    pub fn into_update(self) -> ProductUpdate {
        ProductUpdate {
            id: self.id,
            name: self.name.trim().to_string(),
            description: self.description,
            status: self.status,
            category_ids: dedup_categories(self.category_ids),
            images: self.images,
        }
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request("Product name must not be empty"));
    }
    Ok(())
}

fn validate_image(url: &str, sort_order: i32) -> AppResult<()> {
    if url.trim().is_empty() {
        return Err(AppError::bad_request("Image url must not be empty"));
    }
    if sort_order <= 0 {
        return Err(AppError::bad_request(format!(
            "Image sort order must be positive, got {}",
            sort_order
        )));
    }
    Ok(())
}

fn validate_variant(variant: &NewVariant) -> AppResult<()> {
    if variant.sku.trim().is_empty() {
        return Err(AppError::bad_request("Variant sku must not be empty"));
    }
    if variant.base_unit.trim().is_empty() {
        return Err(AppError::bad_request(format!(
            "Variant {} must have a base unit",
            variant.sku
        )));
    }
    for unit in &variant.units {
        if unit.name.trim().is_empty() {
            return Err(AppError::bad_request(format!(
                "Unit name of variant {} must not be empty",
                variant.sku
            )));
        }
        if unit.conversion_rate <= 0 {
            return Err(AppError::bad_request(format!(
                "Conversion rate of unit {} must be positive",
                unit.name
            )));
        }
    }
    Ok(())
}

/// 去重并保持原有顺序
fn dedup_categories(ids: Vec<CategoryId>) -> Vec<CategoryId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewVariantUnit;

    fn command() -> CreateProductCommand {
        CreateProductCommand {
            name: "  T-Shirt ".to_string(),
            description: "cotton".to_string(),
            category_ids: vec![CategoryId(2), CategoryId(1), CategoryId(2)],
            images: vec![NewProductImage {
                url: "images/a.png".to_string(),
                sort_order: 1,
            }],
            variants: vec![NewVariant {
                sku: "TS-RED-M".to_string(),
                options: vec![],
                base_unit: "pcs".to_string(),
                stock: 10,
                cost_price: 50_000,
                units: vec![NewVariantUnit {
                    name: "pack".to_string(),
                    sku: None,
                    barcode: None,
                    conversion_rate: 12,
                    price: 600_000,
                }],
            }],
        }
    }

    #[test]
    fn test_valid_command_normalizes_name_and_categories() {
        let cmd = command();
        assert!(cmd.validate().is_ok());

        let product = cmd.into_new_product();
        assert_eq!(product.name, "T-Shirt");
        assert_eq!(product.category_ids, vec![CategoryId(2), CategoryId(1)]);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut cmd = command();
        cmd.name = "   ".to_string();
        assert!(matches!(cmd.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_non_positive_sort_order_is_rejected() {
        let mut cmd = command();
        cmd.images[0].sort_order = 0;
        assert!(matches!(cmd.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_zero_conversion_rate_is_rejected() {
        let mut cmd = command();
        cmd.variants[0].units[0].conversion_rate = 0;
        assert!(matches!(cmd.validate(), Err(AppError::BadRequest(_))));
    }
}
