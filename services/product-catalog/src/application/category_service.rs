//! 分类服务

use std::sync::Arc;

use catalog_errors::AppResult;
use metrics::counter;
use tracing::info;

use super::commands::{CreateCategoryCommand, UpdateCategoryCommand};
use super::log_failure;
use crate::domain::entities::Category;
use crate::domain::repositories::CategoryRepository;
use crate::domain::value_objects::CategoryId;

pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_category(&self, cmd: CreateCategoryCommand) -> AppResult<CategoryId> {
        info!(name = %cmd.name, parent_id = ?cmd.parent_id, "Creating category");
        cmd.validate()?;

        let id = self
            .repo
            .create(&cmd.into_new_category())
            .await
            .inspect_err(|e| log_failure("create category", e))?;

        counter!("catalog_categories_created_total").increment(1);
        Ok(id)
    }

    pub async fn get_category(&self, id: CategoryId) -> AppResult<Category> {
        self.repo
            .find_by_id(id)
            .await
            .inspect_err(|e| log_failure("get category", e))
    }

    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.repo
            .list()
            .await
            .inspect_err(|e| log_failure("list categories", e))
    }

    pub async fn update_category(&self, cmd: UpdateCategoryCommand) -> AppResult<()> {
        info!(category_id = %cmd.id, "Updating category");
        cmd.validate()?;

        self.repo
            .update(&cmd.into_category())
            .await
            .inspect_err(|e| log_failure("update category", e))
    }

    pub async fn delete_category(&self, id: CategoryId) -> AppResult<()> {
        info!(category_id = %id, "Deleting category");
        self.repo
            .delete(id)
            .await
            .inspect_err(|e| log_failure("delete category", e))
    }
}
