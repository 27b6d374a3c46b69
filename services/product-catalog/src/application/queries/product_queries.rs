//! 商品查询

use catalog_common::Pagination;

use crate::domain::entities::ProductFilter;
use crate::domain::enums::ProductStatus;
use crate::domain::value_objects::CategoryId;

/// 商品列表查询
#[derive(Debug, Clone, Default)]
pub struct ListProductsQuery {
    pub keyword: Option<String>,
    pub category_id: Option<CategoryId>,
    pub status: Option<ProductStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListProductsQuery {
    /// 转换为仓储过滤条件，空白关键字视为未指定
    pub fn into_filter(self, exclude_archived_by_default: bool) -> ProductFilter {
        let keyword = self
            .keyword
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        ProductFilter {
            keyword,
            category_id: self.category_id,
            status: self.status,
            exclude_archived: exclude_archived_by_default && self.status.is_none(),
            pagination: Pagination::new(self.limit, self.offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_keyword_is_dropped() {
        let query = ListProductsQuery {
            keyword: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(query.into_filter(false).keyword, None);
    }

    #[test]
    fn test_explicit_status_overrides_archived_default() {
        let hidden = ListProductsQuery::default().into_filter(true);
        assert!(hidden.exclude_archived);

        let explicit = ListProductsQuery {
            status: Some(ProductStatus::Archived),
            ..Default::default()
        }
        .into_filter(true);
        assert!(!explicit.exclude_archived);
        assert_eq!(explicit.status, Some(ProductStatus::Archived));

        let visible = ListProductsQuery::default().into_filter(false);
        assert!(!visible.exclude_archived);
    }
}
