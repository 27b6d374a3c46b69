//! 领域服务

mod reconciliation;

pub use reconciliation::*;
