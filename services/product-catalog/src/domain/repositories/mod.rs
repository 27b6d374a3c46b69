//! 仓储接口

mod category_repository;
mod product_repository;

pub use category_repository::*;
pub use product_repository::*;
