//! Refresh token repository (认证数据访问)

use crate::{
    error::AppError,
    models::auth::{NewRefreshToken, RefreshToken},
};
use async_trait::async_trait;
use sqlx::PgPool;

/// 刷新令牌存储能力
#[async_trait]
pub trait RefreshTokenStore: Send + Sync {
    /// 存储刷新令牌，返回带数据库生成 ID 的记录
    async fn save(&self, token: &NewRefreshToken) -> Result<RefreshToken, AppError>;

    /// 按令牌原文查找
    ///
    /// 只返回未过期的记录；已过期的行与不存在的行对调用方不可区分。
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError>;

    /// 删除刷新令牌
    ///
    /// 供显式登出/吊销流程使用，登录与刷新流程不会调用。
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

/// PostgreSQL 实现
pub struct PgRefreshTokenStore {
    db: PgPool,
}

impl PgRefreshTokenStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RefreshTokenStore for PgRefreshTokenStore {
    async fn save(&self, token: &NewRefreshToken) -> Result<RefreshToken, AppError> {
        let record = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(token.user_id)
        .bind(&token.token)
        .bind(token.expires_at)
        .fetch_one(&self.db)
        .await?;

        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, AppError> {
        let record = sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens WHERE token = $1 AND expires_at > NOW()",
        )
        .bind(token)
        .fetch_optional(&self.db)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
