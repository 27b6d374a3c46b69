//! 商品服务
//!
//! 投递层与仓储之间的接缝：校验命令、转换过滤条件、记录日志与指标，错误原样向上传递

use std::sync::Arc;

use catalog_errors::AppResult;
use metrics::counter;
use tracing::info;

use super::commands::{CreateProductCommand, UpdateProductCommand};
use super::log_failure;
use super::queries::ListProductsQuery;
use crate::domain::entities::{ProductDetail, ProductSummary};
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::{ImageId, ProductId};

pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    exclude_archived_by_default: bool,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self {
            repo,
            exclude_archived_by_default: false,
        }
    }

    /// 未指定状态过滤的列表查询是否隐藏已归档商品
    pub fn with_archived_hidden_by_default(mut self, hidden: bool) -> Self {
        self.exclude_archived_by_default = hidden;
        self
    }

    /// 创建商品
    pub async fn create_product(&self, cmd: CreateProductCommand) -> AppResult<ProductId> {
        info!(
            name = %cmd.name,
            categories = cmd.category_ids.len(),
            images = cmd.images.len(),
            variants = cmd.variants.len(),
            "Creating product"
        );
        cmd.validate()?;

        let product = cmd.into_new_product();
        let id = self
            .repo
            .create(&product)
            .await
            .inspect_err(|e| log_failure("create product", e))?;

        counter!("catalog_products_created_total").increment(1);
        info!(product_id = %id, "Product created");
        Ok(id)
    }

    /// 商品列表
    pub async fn list_products(&self, query: ListProductsQuery) -> AppResult<Vec<ProductSummary>> {
        let filter = query.into_filter(self.exclude_archived_by_default);
        self.repo
            .find_all(&filter)
            .await
            .inspect_err(|e| log_failure("list products", e))
    }

    /// 商品详情
    pub async fn get_product(&self, id: ProductId) -> AppResult<ProductDetail> {
        self.repo
            .find_by_id(id)
            .await
            .inspect_err(|e| log_failure("get product", e))
    }

    /// 更新商品
    pub async fn update_product(&self, cmd: UpdateProductCommand) -> AppResult<()> {
        info!(product_id = %cmd.id, images = cmd.images.len(), "Updating product");
        cmd.validate()?;

        let update = cmd.into_update();
        self.repo
            .update(&update)
            .await
            .inspect_err(|e| log_failure("update product", e))?;

        counter!("catalog_products_updated_total").increment(1);
        Ok(())
    }

    /// 软删除商品
    pub async fn delete_product(&self, id: ProductId) -> AppResult<()> {
        info!(product_id = %id, "Archiving product");
        self.repo
            .delete(id)
            .await
            .inspect_err(|e| log_failure("archive product", e))?;

        counter!("catalog_products_archived_total").increment(1);
        Ok(())
    }

    /// 图片 URL
    pub async fn get_product_image(&self, id: ImageId) -> AppResult<String> {
        self.repo
            .find_image_url(id)
            .await
            .inspect_err(|e| log_failure("get product image", e))
    }
}
