//! 健康检查处理器
//! 提供 /health、/ready 和 /api/v1/ping 端点

use axum::{extract::State, Json};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{db, middleware::AppState};

/// 存活探针响应
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// 就绪探针响应
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: Vec<HealthCheck>,
}

/// 健康检查项
#[derive(Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// 应用启动时间（在 main.rs 中设置）
static APP_START_TIME: OnceLock<u64> = OnceLock::new();

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

/// 设置应用启动时间
pub fn set_start_time() {
    let _ = APP_START_TIME.set(now_secs());
}

/// 获取应用运行时间（秒）
pub fn get_uptime() -> u64 {
    APP_START_TIME
        .get()
        .map_or(0, |start| now_secs().saturating_sub(*start))
}

/// 存活探针
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: get_uptime(),
    })
}

/// 就绪探针（检查数据库连通性）
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> Json<ReadinessResponse> {
    db::record_pool_metrics(&state.db);

    let (status, message) = match db::health_check(&state.db).await {
        db::HealthStatus::Healthy => ("ok".to_string(), None),
        db::HealthStatus::Unhealthy(msg) => ("unhealthy".to_string(), Some(msg)),
    };

    let ready = status == "ok";

    Json(ReadinessResponse {
        ready,
        checks: vec![HealthCheck {
            name: "database".to_string(),
            status,
            message,
        }],
    })
}

/// API 探活端点
pub async fn ping() -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "message": "Server up and running."
    }))
}
