//! 用户管理的 HTTP 处理器
//! 路由层已通过认证与属主校验中间件，此处的 user_id 即当前登录用户

use crate::{
    error::AppError,
    middleware::AppState,
    models::user::{ResetPasswordRequest, UpdateUserRequest},
};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use validator::Validate;

/// 获取用户详情
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.user_service.get_user(user_id).await?;

    Ok(Json(user))
}

/// 更新用户
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = state.user_service.update_user(user_id, &req).await?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": user
    })))
}

/// 重置密码
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    req.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    state.user_service.change_password(user_id, &req).await?;

    Ok(Json(json!({
        "message": "Password updated successfully"
    })))
}

/// 删除用户
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.user_service.delete_user(user_id).await?;

    Ok(Json(json!({
        "message": "User deleted successfully"
    })))
}
