//! 服务启动器
//!
//! HTTP 服务作为受监督的任务运行，进程主流程等待它退出

use std::future::Future;
use std::io;

use axum::Router;
use catalog_config::AppConfig;
use catalog_errors::AppResult;
use catalog_telemetry::init_metrics;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::health::health_routes;
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 服务任务的退出方式
#[derive(Debug)]
pub enum ServerExit {
    /// 收到关闭信号后正常退出
    Graceful,
    /// `serve` 返回 I/O 错误
    Failed(io::Error),
    /// 任务 panic 或被取消
    Aborted(String),
}

impl ServerExit {
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Graceful)
    }
}

/// 等待服务任务结束并归类其退出方式
///
/// 单个请求的失败在请求内部处理，不会结束任务；
/// 任务本身结束而非正常关闭时一律视为致命。
pub async fn supervise(handle: JoinHandle<io::Result<()>>) -> ServerExit {
    match handle.await {
        Ok(Ok(())) => ServerExit::Graceful,
        Ok(Err(e)) => ServerExit::Failed(e),
        Err(join_err) => ServerExit::Aborted(join_err.to_string()),
    }
}

/// 运行 HTTP 服务
///
/// 1. 加载配置
/// 2. 初始化日志与 Prometheus recorder
/// 3. 创建基础设施（数据库连接池，带重试）
/// 4. 调用闭包构建业务路由，并合并健康检查路由
/// 5. 启动受监督的服务任务，等待关闭信号
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     catalog_bootstrap::run_http("config", |infra| async move {
///         Ok(build_router(infra.postgres_pool()))
///     })
///     .await
/// }
/// ```
pub async fn run_http<F, Fut>(
    config_dir: &str,
    app_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(Infrastructure) -> Fut,
    Fut: Future<Output = AppResult<Router>>,
{
    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = init_metrics()?;
    let infra = Infrastructure::from_config(config.clone()).await?;
    let health = health_routes(infra.postgres_pool(), Some(metrics));

    let app = app_builder(infra).await?.merge(health);

    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!(addr = %listener.local_addr()?, "HTTP server starting");

    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    });

    match supervise(server).await {
        ServerExit::Graceful => {
            info!("Service stopped");
            Ok(())
        }
        ServerExit::Failed(e) => {
            error!(error = %e, "HTTP server failed");
            Err(e.into())
        }
        ServerExit::Aborted(reason) => {
            error!(%reason, "HTTP server task aborted");
            Err(reason.into())
        }
    }
}
