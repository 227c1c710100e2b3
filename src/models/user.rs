//! 用户领域模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{validate_role, PHONE_RE};

/// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,

    /// 密码哈希，永不序列化到响应
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// 软删除标记
    pub is_deleted: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 待入库的新用户（密码已哈希）
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub password_hash: String,
}

/// 更新用户请求
#[derive(Debug, Deserialize, validator::Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(regex(path = *PHONE_RE, message = "phone must be in E.164 format"))]
    pub phone: String,
    #[validate(custom(function = validate_role))]
    pub role: String,
}

/// 重置密码请求
#[derive(Debug, Deserialize, validator::Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 6))]
    pub current_password: String,
    #[validate(length(min = 6))]
    pub new_password: String,
}

/// 用户响应（不含敏感字段）
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
