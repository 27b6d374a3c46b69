//! 商品状态枚举

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};

/// 商品生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    /// 在售
    #[default]
    Active,
    /// 下架
    Inactive,
    /// 已归档（软删除）
    Archived,
}

impl ProductStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Inactive => "inactive",
            ProductStatus::Archived => "archived",
        }
    }

    pub fn is_archived(&self) -> bool {
        matches!(self, ProductStatus::Archived)
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 未知的状态字符串
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown product status: {_0}")]
pub struct UnknownStatus(#[error(not(source))] pub String);

impl FromStr for ProductStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ProductStatus::Active),
            "inactive" => Ok(ProductStatus::Inactive),
            "archived" => Ok(ProductStatus::Archived),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// 与 `FromStr` 同样不区分大小写，查询参数和请求体都按此解析
impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Active".parse::<ProductStatus>(), Ok(ProductStatus::Active));
        assert_eq!(" archived ".parse::<ProductStatus>(), Ok(ProductStatus::Archived));
        assert!("deleted".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_deserialize_matches_parse() {
        let status: ProductStatus = serde_json::from_str("\"Inactive\"").unwrap();
        assert_eq!(status, ProductStatus::Inactive);
        assert!(serde_json::from_str::<ProductStatus>("\"deleted\"").is_err());
        assert_eq!(serde_json::to_string(&ProductStatus::Archived).unwrap(), "\"archived\"");
    }
}
