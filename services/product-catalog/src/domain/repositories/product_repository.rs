//! 商品聚合仓储接口

use async_trait::async_trait;
use catalog_errors::AppResult;

use crate::domain::entities::{NewProduct, ProductDetail, ProductFilter, ProductSummary, ProductUpdate};
use crate::domain::value_objects::{ImageId, ProductId};

/// 商品聚合仓储接口
///
/// 写操作在单个事务内完成，任何一步失败都整体回滚。
/// 读操作不在事务内，子查询之间可能观察到并发更新。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 创建商品及其分类链接、图片、规格（含选项和单位），返回新 ID
    async fn create(&self, product: &NewProduct) -> AppResult<ProductId>;

    /// 列表查询，按 ID 倒序
    async fn find_all(&self, filter: &ProductFilter) -> AppResult<Vec<ProductSummary>>;

    /// 查询详情，不存在时返回 NotFound
    async fn find_by_id(&self, id: ProductId) -> AppResult<ProductDetail>;

    /// 更新标量字段并调和分类链接与图片
    async fn update(&self, update: &ProductUpdate) -> AppResult<()>;

    /// 软删除：状态迁移到 archived
    async fn delete(&self, id: ProductId) -> AppResult<()>;

    /// 按图片 ID 查询 URL
    async fn find_image_url(&self, id: ImageId) -> AppResult<String>;
}
