//! 应用层

pub mod commands;
pub mod queries;

mod category_service;
mod product_service;

pub use category_service::CategoryService;
pub use product_service::ProductService;

use catalog_errors::AppError;
use tracing::{error, warn};

/// 客户端错误记 warn，服务端错误记 error
fn log_failure(operation: &str, err: &AppError) {
    if err.status_code() >= 500 {
        error!(operation, error = %err, "Operation failed");
    } else {
        warn!(operation, error = %err, "Operation rejected");
    }
}
