//! PostgreSQL 事务辅助
//!
//! `Transaction` 在未提交时被 drop 会自动回滚，因此写操作只需在成功路径上调用 `commit`。

use catalog_errors::AppResult;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::debug;

use crate::map_sqlx_error;

pub type PgTransaction = Transaction<'static, Postgres>;

/// 开启事务
pub async fn begin(pool: &PgPool) -> AppResult<PgTransaction> {
    let tx = pool.begin().await.map_err(map_sqlx_error)?;
    debug!("Transaction started");
    Ok(tx)
}

/// 提交事务
pub async fn commit(tx: PgTransaction) -> AppResult<()> {
    tx.commit().await.map_err(map_sqlx_error)?;
    debug!("Transaction committed");
    Ok(())
}
