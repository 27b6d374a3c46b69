//! 分类命令

use catalog_errors::{AppError, AppResult};

use crate::domain::entities::{Category, NewCategory};
use crate::domain::value_objects::CategoryId;

/// 创建分类命令
#[derive(Debug, Clone)]
pub struct CreateCategoryCommand {
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

impl CreateCategoryCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::bad_request("Category name must not be empty"));
        }
        Ok(())
    }

    pub fn into_new_category(self) -> NewCategory {
        NewCategory {
            name: self.name.trim().to_string(),
            parent_id: self.parent_id,
        }
    }
}

/// 更新分类命令
#[derive(Debug, Clone)]
pub struct UpdateCategoryCommand {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

impl UpdateCategoryCommand {
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::bad_request("Category name must not be empty"));
        }
        if self.parent_id == Some(self.id) {
            return Err(AppError::bad_request("A category cannot be its own parent"));
        }
        Ok(())
    }

    pub fn into_category(self) -> Category {
        Category {
            id: self.id,
            name: self.name.trim().to_string(),
            parent_id: self.parent_id,
        }
    }
}
