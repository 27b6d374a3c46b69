//! PostgreSQL 商品聚合仓储实现

use async_trait::async_trait;
use catalog_adapter_postgres::{begin, commit, map_sqlx_error};
use catalog_errors::{AppError, AppResult};
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::converters::{parse_status, variant_from_rows};
use super::rows::{
    CategoryRow, ImageRow, ProductRow, ProductSummaryRow, VariantOptionRow, VariantRow,
    VariantUnitRow,
};
use crate::domain::entities::{
    NewProduct, NewVariant, ProductDetail, ProductFilter, ProductSummary, ProductUpdate,
};
use crate::domain::enums::ProductStatus;
use crate::domain::repositories::ProductRepository;
use crate::domain::services::{reconcile, reconcile_keys};
use crate::domain::value_objects::{ImageId, ProductId};

const SELECT_SUMMARY: &str = r#"
SELECT
    p.id,
    p.name,
    p.description,
    p.status,
    COALESCE(
        (SELECT ARRAY_AGG(cp.category_id ORDER BY cp.category_id)
         FROM category_products cp
         WHERE cp.product_id = p.id),
        '{}'
    ) AS category_ids,
    COALESCE(
        (SELECT JSONB_AGG(
                    JSONB_BUILD_OBJECT(
                        'id', pi.id,
                        'product_id', pi.product_id,
                        'url', pi.url,
                        'sort_order', pi.sort_order
                    )
                    ORDER BY pi.sort_order, pi.id)
         FROM product_images pi
         WHERE pi.product_id = p.id),
        '[]'::JSONB
    ) AS images
FROM products p
WHERE TRUE"#;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// 转义 LIKE 通配符，关键字按字面匹配
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// 批量写入商品与分类的链接
async fn link_categories(
    conn: &mut PgConnection,
    product_id: i64,
    category_ids: &[i64],
) -> AppResult<()> {
    if category_ids.is_empty() {
        return Ok(());
    }
    sqlx::query(
        "INSERT INTO category_products (product_id, category_id) SELECT $1, UNNEST($2::BIGINT[])",
    )
    .bind(product_id)
    .bind(category_ids)
    .execute(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;
    Ok(())
}

async fn insert_image(
    conn: &mut PgConnection,
    product_id: i64,
    url: &str,
    sort_order: i32,
) -> AppResult<()> {
    sqlx::query("INSERT INTO product_images (product_id, url, sort_order) VALUES ($1, $2, $3)")
        .bind(product_id)
        .bind(url)
        .bind(sort_order)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;
    Ok(())
}

/// 写入规格，然后写入它的选项和单位
async fn insert_variant(
    conn: &mut PgConnection,
    product_id: i64,
    variant: &NewVariant,
) -> AppResult<()> {
    let variant_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO variants (product_id, sku, base_unit, stock, cost_price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(product_id)
    .bind(&variant.sku)
    .bind(&variant.base_unit)
    .bind(variant.stock)
    .bind(variant.cost_price)
    .fetch_one(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;

    for option in &variant.options {
        sqlx::query("INSERT INTO variant_options (variant_id, name, value) VALUES ($1, $2, $3)")
            .bind(variant_id)
            .bind(&option.name)
            .bind(&option.value)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
    }

    for unit in &variant.units {
        sqlx::query(
            r#"
            INSERT INTO variant_units (variant_id, name, sku, barcode, conversion_rate, price)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(variant_id)
        .bind(&unit.name)
        .bind(&unit.sku)
        .bind(&unit.barcode)
        .bind(unit.conversion_rate)
        .bind(unit.price)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;
    }

    Ok(())
}

/// 分类链接调和：只插入新增、只删除移除的链接
async fn reconcile_categories(
    conn: &mut PgConnection,
    product_id: i64,
    desired: &[i64],
) -> AppResult<()> {
    let current: Vec<i64> = sqlx::query_scalar(
        "SELECT category_id FROM category_products WHERE product_id = $1 ORDER BY category_id",
    )
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;

    let plan = reconcile_keys(current, desired.iter().copied());
    debug!(
        product_id,
        insert = plan.to_insert.len(),
        delete = plan.to_delete.len(),
        "Reconciling category links"
    );

    link_categories(conn, product_id, &plan.to_insert).await?;

    if !plan.to_delete.is_empty() {
        sqlx::query(
            "DELETE FROM category_products WHERE product_id = $1 AND category_id = ANY($2)",
        )
        .bind(product_id)
        .bind(&plan.to_delete)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;
    }
    Ok(())
}

/// 图片调和：按图片 ID 计算删除、更新、插入
async fn reconcile_images(
    conn: &mut PgConnection,
    update: &ProductUpdate,
) -> AppResult<()> {
    let product_id = update.id.0;
    let current: Vec<ImageRow> = sqlx::query_as(
        "SELECT id, product_id, url, sort_order FROM product_images WHERE product_id = $1 ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(map_sqlx_error)?;

    let plan = reconcile(
        current.into_iter().map(|row| (row.id, (row.url, row.sort_order))),
        update
            .images
            .iter()
            .map(|image| (image.id.map(|id| id.0), (image.url.clone(), image.sort_order))),
    );
    debug!(
        product_id,
        insert = plan.to_insert.len(),
        update = plan.to_update.len(),
        delete = plan.to_delete.len(),
        "Reconciling images"
    );

    if !plan.to_delete.is_empty() {
        sqlx::query("DELETE FROM product_images WHERE product_id = $1 AND id = ANY($2)")
            .bind(product_id)
            .bind(&plan.to_delete)
            .execute(&mut *conn)
            .await
            .map_err(map_sqlx_error)?;
    }

    for (image_id, (url, sort_order)) in &plan.to_update {
        sqlx::query(
            "UPDATE product_images SET url = $3, sort_order = $4 WHERE id = $1 AND product_id = $2",
        )
        .bind(image_id)
        .bind(product_id)
        .bind(url)
        .bind(sort_order)
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx_error)?;
    }

    for (url, sort_order) in &plan.to_insert {
        insert_image(conn, product_id, url, *sort_order).await?;
    }
    Ok(())
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: &NewProduct) -> AppResult<ProductId> {
        let mut tx = begin(&self.pool).await?;

        let product_id: i64 = sqlx::query_scalar(
            "INSERT INTO products (name, description, status) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(ProductStatus::Active.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        let category_ids: Vec<i64> = product.category_ids.iter().map(|c| c.0).collect();
        link_categories(&mut tx, product_id, &category_ids).await?;

        for image in &product.images {
            insert_image(&mut tx, product_id, &image.url, image.sort_order).await?;
        }

        for variant in &product.variants {
            insert_variant(&mut tx, product_id, variant).await?;
        }

        commit(tx).await?;
        Ok(ProductId(product_id))
    }

    async fn find_all(&self, filter: &ProductFilter) -> AppResult<Vec<ProductSummary>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(SELECT_SUMMARY);

        if let Some(keyword) = &filter.keyword {
            qb.push(" AND p.name ILIKE ").push_bind(like_pattern(keyword));
        }
        if let Some(category_id) = filter.category_id {
            qb.push(
                " AND EXISTS (SELECT 1 FROM category_products f WHERE f.product_id = p.id AND f.category_id = ",
            )
            .push_bind(category_id.0)
            .push(")");
        }
        if let Some(status) = filter.status {
            qb.push(" AND p.status = ").push_bind(status.as_str());
        } else if filter.exclude_archived {
            qb.push(" AND p.status <> ")
                .push_bind(ProductStatus::Archived.as_str());
        }

        qb.push(" ORDER BY p.id DESC");
        if let Some(limit) = filter.pagination.effective_limit() {
            qb.push(" LIMIT ").push_bind(limit);
        }
        if let Some(offset) = filter.pagination.effective_offset() {
            qb.push(" OFFSET ").push_bind(offset);
        }

        let rows: Vec<ProductSummaryRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(ProductSummary::try_from).collect()
    }

    async fn find_by_id(&self, id: ProductId) -> AppResult<ProductDetail> {
        let product: ProductRow = sqlx::query_as(
            "SELECT id, name, description, status FROM products WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", id)))?;

        let categories: Vec<CategoryRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.name, c.parent_id
            FROM category_products cp
            JOIN categories c ON c.id = cp.category_id
            WHERE cp.product_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let images: Vec<ImageRow> = sqlx::query_as(
            "SELECT id, product_id, url, sort_order FROM product_images WHERE product_id = $1 ORDER BY sort_order, id",
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let variant_rows: Vec<VariantRow> = sqlx::query_as(
            "SELECT id, product_id, sku, base_unit, stock, cost_price FROM variants WHERE product_id = $1 ORDER BY id",
        )
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let mut variants = Vec::with_capacity(variant_rows.len());
        for row in variant_rows {
            let options: Vec<VariantOptionRow> =
                sqlx::query_as("SELECT name, value FROM variant_options WHERE variant_id = $1")
                    .bind(row.id)
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_sqlx_error)?;

            let units: Vec<VariantUnitRow> = sqlx::query_as(
                r#"
                SELECT id, variant_id, name, sku, barcode, conversion_rate, price
                FROM variant_units
                WHERE variant_id = $1
                ORDER BY id
                "#,
            )
            .bind(row.id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

            variants.push(variant_from_rows(row, options, units));
        }

        Ok(ProductDetail {
            id: ProductId(product.id),
            status: parse_status(&product.status)?,
            name: product.name,
            description: product.description,
            categories: categories.into_iter().map(Into::into).collect(),
            images: images.into_iter().map(Into::into).collect(),
            variants,
        })
    }

    async fn update(&self, update: &ProductUpdate) -> AppResult<()> {
        let mut tx = begin(&self.pool).await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, status = COALESCE($4, status), updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(update.id.0)
        .bind(&update.name)
        .bind(&update.description)
        .bind(update.status.map(|s| s.as_str()))
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product {} not found", update.id)));
        }

        let category_ids: Vec<i64> = update.category_ids.iter().map(|c| c.0).collect();
        reconcile_categories(&mut tx, update.id.0, &category_ids).await?;

        // 未提交图片表示保持不变
        if !update.images.is_empty() {
            reconcile_images(&mut tx, update).await?;
        }

        commit(tx).await
    }

    async fn delete(&self, id: ProductId) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE products SET status = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id.0)
        .bind(ProductStatus::Archived.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Product {} not found", id)));
        }
        Ok(())
    }

    async fn find_image_url(&self, id: ImageId) -> AppResult<String> {
        sqlx::query_scalar("SELECT url FROM product_images WHERE id = $1")
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| AppError::not_found(format!("Image {} not found", id)))
    }
}
