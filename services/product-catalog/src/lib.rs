//! product-catalog - 商品目录服务
//!
//! 商品聚合（分类链接、图片、规格及其选项和单位）与分类树的存储和管理

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod migrations;
