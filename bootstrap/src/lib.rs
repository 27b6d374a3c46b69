//! catalog-bootstrap - 统一服务启动骨架
//!
//! 配置、日志、指标、数据库连接池与 HTTP 服务生命周期

mod health;
mod infrastructure;
mod runtime;
mod starter;

pub use health::*;
pub use infrastructure::*;
pub use runtime::*;
pub use starter::*;
