//! 枚举定义

mod product_status;

pub use product_status::*;
