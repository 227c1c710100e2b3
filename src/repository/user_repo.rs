//! User repository (数据库访问层)

use crate::{
    error::AppError,
    models::user::{NewUser, UpdateUserRequest, User},
};
use async_trait::async_trait;
use sqlx::PgPool;

/// 用户存储能力
///
/// 服务层只依赖该 trait，便于替换存储实现与注入测试替身。
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 创建用户，返回带数据库生成字段的完整记录
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;

    /// 根据邮箱查找用户
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// 根据 ID 查找用户
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// 更新用户基础信息
    async fn update(&self, id: i64, req: &UpdateUserRequest) -> Result<Option<User>, AppError>;

    /// 更新密码哈希
    async fn change_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError>;

    /// 软删除用户
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}

/// PostgreSQL 实现
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: &NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, phone, role, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.role)
        .bind(&user.password_hash)
        .fetch_one(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE email = $1 AND is_deleted = false",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: i64, req: &UpdateUserRequest) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = $2,
                phone = $3,
                role = $4,
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = false
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&req.name)
        .bind(&req.phone)
        .bind(&req.role)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn change_password(&self, id: i64, password_hash: &str) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET
                password_hash = $2,
                updated_at = NOW()
            WHERE id = $1 AND is_deleted = false
            "#,
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET is_deleted = true, updated_at = NOW() WHERE id = $1 AND is_deleted = false",
        )
        .bind(id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
