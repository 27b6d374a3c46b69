//! PostgreSQL 分类仓储实现

use async_trait::async_trait;
use catalog_adapter_postgres::{begin, commit, map_sqlx_error};
use catalog_errors::{AppError, AppResult};
use sqlx::PgPool;

use super::rows::CategoryRow;
use crate::domain::entities::{Category, NewCategory};
use crate::domain::repositories::CategoryRepository;
use crate::domain::value_objects::CategoryId;

/// 分类树调整使用的事务级咨询锁键
const CATEGORY_TREE_LOCK: i64 = 0x6361_7465_676f_7279;

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: &NewCategory) -> AppResult<CategoryId> {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO categories (name, parent_id) VALUES ($1, $2) RETURNING id")
                .bind(&category.name)
                .bind(category.parent_id.map(|p| p.0))
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(CategoryId(id))
    }

    async fn find_by_id(&self, id: CategoryId) -> AppResult<Category> {
        let row: CategoryRow =
            sqlx::query_as("SELECT id, name, parent_id FROM categories WHERE id = $1")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(map_sqlx_error)?
                .ok_or_else(|| AppError::not_found(format!("Category {} not found", id)))?;
        Ok(row.into())
    }

    async fn list(&self) -> AppResult<Vec<Category>> {
        let rows: Vec<CategoryRow> =
            sqlx::query_as("SELECT id, name, parent_id FROM categories ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(map_sqlx_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&self, category: &Category) -> AppResult<()> {
        let mut tx = begin(&self.pool).await?;

        if let Some(parent_id) = category.parent_id {
            // 挂父节点的更新互斥执行，成环检查读到的是已提交的最新树
            sqlx::query("SELECT pg_advisory_xact_lock($1)")
                .bind(CATEGORY_TREE_LOCK)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

            // 新父节点的祖先链上出现自身即成环
            let creates_cycle: bool = sqlx::query_scalar(
                r#"
                WITH RECURSIVE ancestors (id, parent_id) AS (
                    SELECT id, parent_id FROM categories WHERE id = $1
                    UNION
                    SELECT c.id, c.parent_id
                    FROM categories c
                    JOIN ancestors a ON c.id = a.parent_id
                )
                SELECT EXISTS (SELECT 1 FROM ancestors WHERE id = $2)
                "#,
            )
            .bind(parent_id.0)
            .bind(category.id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

            if creates_cycle {
                return Err(AppError::bad_request(format!(
                    "Category {} cannot be moved under {}: it would create a cycle",
                    category.id, parent_id
                )));
            }
        }

        let result = sqlx::query(
            "UPDATE categories SET name = $2, parent_id = $3, updated_at = NOW() WHERE id = $1",
        )
        .bind(category.id.0)
        .bind(&category.name)
        .bind(category.parent_id.map(|p| p.0))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Category {} not found", category.id)));
        }

        commit(tx).await
    }

    async fn delete(&self, id: CategoryId) -> AppResult<()> {
        let mut tx = begin(&self.pool).await?;

        let has_children: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM categories WHERE parent_id = $1)",
        )
        .bind(id.0)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if has_children {
            return Err(AppError::bad_request(format!(
                "Category {} still has child categories",
                id
            )));
        }

        // 商品链接随外键级联删除
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.0)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Category {} not found", id)));
        }

        commit(tx).await
    }
}
