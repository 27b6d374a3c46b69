//! 基础设施资源管理

use catalog_adapter_postgres::{PostgresConfig, create_pool};
use catalog_common::{RetryConfig, is_transient_error, with_conditional_retry};
use catalog_config::AppConfig;
use catalog_errors::AppResult;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

/// 基础设施资源容器
#[derive(Clone)]
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源
    ///
    /// 启动阶段的连接失败属于可恢复错误，按指数退避重试；
    /// 认证失败等非瞬时错误立即返回。
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let pg_config = PostgresConfig::new(config.database.url.expose_secret())
            .with_max_connections(config.database.max_connections);

        let postgres_pool = with_conditional_retry(
            &RetryConfig::default(),
            "PostgreSQL connection",
            || create_pool(&pg_config),
            |e| is_transient_error(&e.to_string()),
        )
        .await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }
}
