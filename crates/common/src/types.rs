//! 通用类型定义

use serde::{Deserialize, Serialize};

/// 基于 limit/offset 的分页参数
///
/// 两者都为空时不分页。非正数与空值等价。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self { limit, offset }
    }

    /// 生效的 limit
    pub fn effective_limit(&self) -> Option<i64> {
        self.limit.filter(|v| *v > 0)
    }

    /// 生效的 offset
    pub fn effective_offset(&self) -> Option<i64> {
        self.offset.filter(|v| *v > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_values_disable_paging() {
        let page = Pagination::new(Some(0), Some(-3));
        assert_eq!(page.effective_limit(), None);
        assert_eq!(page.effective_offset(), None);

        let page = Pagination::new(Some(20), Some(40));
        assert_eq!(page.effective_limit(), Some(20));
        assert_eq!(page.effective_offset(), Some(40));
    }
}
