//! 分类仓储接口

use async_trait::async_trait;
use catalog_errors::AppResult;

use crate::domain::entities::{Category, NewCategory};
use crate::domain::value_objects::CategoryId;

/// 分类仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// 创建分类，名称重复时返回 Conflict
    async fn create(&self, category: &NewCategory) -> AppResult<CategoryId>;

    /// 根据 ID 查找分类，不存在时返回 NotFound
    async fn find_by_id(&self, id: CategoryId) -> AppResult<Category>;

    /// 全部分类
    async fn list(&self) -> AppResult<Vec<Category>>;

    /// 更新名称和父分类
    async fn update(&self, category: &Category) -> AppResult<()>;

    /// 物理删除
    async fn delete(&self, id: CategoryId) -> AppResult<()>;
}
