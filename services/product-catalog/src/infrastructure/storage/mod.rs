//! 图片存储实现

mod local;

pub use local::LocalImageStorage;
