//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use catalog_adapter_postgres::check_connection;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use sqlx::PgPool;

/// 健康检查状态
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub checks: Vec<ComponentHealth>,
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: &'static str,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl HealthStatus {
    fn healthy() -> Self {
        Self {
            status: "healthy",
            checks: vec![],
        }
    }

    fn add_check(&mut self, check: ComponentHealth) {
        if check.status != "healthy" {
            self.status = "unhealthy";
        }
        self.checks.push(check);
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[derive(Clone)]
struct HealthState {
    pool: PgPool,
    metrics: Option<PrometheusHandle>,
}

/// 健康检查与指标路由
pub fn health_routes(pool: PgPool, metrics: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(HealthState { pool, metrics })
}

/// Liveness：进程存活即健康
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthStatus::healthy()))
}

/// Readiness：数据库可用才就绪
async fn ready_handler(State(state): State<HealthState>) -> impl IntoResponse {
    let mut status = HealthStatus::healthy();
    status.add_check(match check_connection(&state.pool).await {
        Ok(()) => ComponentHealth {
            name: "postgres",
            status: "healthy",
            message: None,
        },
        Err(e) => ComponentHealth {
            name: "postgres",
            status: "unhealthy",
            message: Some(e.to_string()),
        },
    });

    let code = if status.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(status))
}

async fn metrics_handler(State(state): State<HealthState>) -> impl IntoResponse {
    match state.metrics {
        Some(handle) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
