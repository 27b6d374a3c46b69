//! 请求处理函数

pub mod categories;
pub mod images;
pub mod products;
