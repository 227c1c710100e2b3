//! 认证相关模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_role, PHONE_RE};

/// 注册请求
#[derive(Debug, Deserialize, validator::Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(regex(path = *PHONE_RE, message = "phone must be in E.164 format"))]
    pub phone: String,
    #[validate(custom(function = validate_role))]
    pub role: String,
    #[validate(length(min = 6))]
    pub password: String,
}

/// 登录请求
#[derive(Debug, Clone, Deserialize, validator::Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// 刷新令牌请求
#[derive(Debug, Deserialize, validator::Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// 刷新令牌响应
#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

/// 已持久化的刷新令牌记录
///
/// 一个用户可同时持有多条有效记录（多端会话），不去重、不设上限。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// 待入库的刷新令牌
#[derive(Debug, Clone)]
pub struct NewRefreshToken {
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
