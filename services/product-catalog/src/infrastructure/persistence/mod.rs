//! 持久化实现

mod category_repository;
mod converters;
mod product_repository;
mod rows;

pub use category_repository::PostgresCategoryRepository;
pub use product_repository::PostgresProductRepository;
