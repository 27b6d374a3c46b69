//! 商品分类

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::CategoryId;

/// 分类，`parent_id` 为空表示根节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
}

/// 待创建的分类
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub parent_id: Option<CategoryId>,
}
